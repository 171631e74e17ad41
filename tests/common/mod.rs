#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use produtos_console::client::ProductClient;
use produtos_console::events::{event_channel, Event, EventSender};
use produtos_console::prompt::ConfirmationPrompt;
use produtos_console::viewmodel::{ProductFormModel, ProductListModel};

/// Helper harness backed by a wiremock product service, with the client
/// and event channel wired the way the binary wires them.
pub struct TestApp {
    pub server: MockServer,
    pub client: ProductClient,
    pub events: EventSender,
    pub rx: mpsc::Receiver<Event>,
}

impl TestApp {
    /// Starts a fresh mock service and a client pointed at it.
    pub async fn spawn() -> Self {
        let server = MockServer::start().await;
        let client = ProductClient::new(&format!("{}/api/produtos", server.uri()))
            .expect("mock server URI should parse");
        let (events, rx) = event_channel(32);
        Self {
            server,
            client,
            events,
            rx,
        }
    }

    pub fn list_model(&self, prompt: Arc<dyn ConfirmationPrompt>) -> ProductListModel {
        ProductListModel::new(self.client.clone(), self.events.clone(), prompt)
    }

    pub fn form_model(&self) -> ProductFormModel {
        ProductFormModel::new(self.client.clone(), self.events.clone())
    }

    /// Mounts a catalog response for `GET {base}/`. Call repeatedly with
    /// `times` bounds to script successive fetches.
    pub async fn mount_catalog(&self, products: Value, times: Option<u64>) {
        let mock = Mock::given(method("GET"))
            .and(path("/api/produtos/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products));
        let mock = match times {
            Some(n) => mock.up_to_n_times(n),
            None => mock,
        };
        mock.mount(&self.server).await;
    }
}

/// Product JSON exactly as the backend serves it.
pub fn product_json(id: i64, name: &str, price: f64, stock: i64) -> Value {
    json!({"id": id, "nome": name, "preco": price, "quantidadeEstoque": stock})
}

/// Prompt scripted with a fixed answer, recording every question asked.
pub struct ScriptedPrompt {
    answer: bool,
    questions: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            questions: Mutex::new(Vec::new()),
        })
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().expect("prompt lock poisoned").clone()
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.questions
            .lock()
            .expect("prompt lock poisoned")
            .push(message.to_string());
        self.answer
    }
}
