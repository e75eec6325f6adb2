use crate::client::AssistantClient;
use crate::error::ClientError;
use crate::models::{AskResponse, PdfFile, UploadResponse};
use crate::view::View;

pub const NO_FILE_ALERT: &str = "Please select a PDF.";

// Only a missing file reaches the view. Other failures leave it untouched.
pub struct Assistant<V: View> {
    client: AssistantClient,
    view: V,
}

impl<V: View> Assistant<V> {
    pub fn new(client: AssistantClient, view: V) -> Self {
        Self { client, view }
    }

    pub fn client(&self) -> &AssistantClient {
        &self.client
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub async fn upload(&mut self, selection: Option<&PdfFile>) -> Result<UploadResponse, ClientError> {
        let Some(file) = selection else {
            self.view.alert(NO_FILE_ALERT);
            return Err(ClientError::NoFileSelected);
        };

        match self.client.upload_pdf(file).await {
            Ok(response) => {
                self.view.show_status(&response.message);
                Ok(response)
            }
            Err(e) => {
                log::warn!("Upload of {} failed: {}", file.file_name, e);
                Err(e)
            }
        }
    }

    pub async fn ask(&mut self, question: &str) -> Result<AskResponse, ClientError> {
        match self.client.ask(question).await {
            Ok(response) => {
                self.view.show_answer(&response.reply);
                Ok(response)
            }
            Err(e) => {
                log::warn!("Question failed: {}", e);
                Err(e)
            }
        }
    }
}
