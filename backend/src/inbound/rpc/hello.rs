//! Hello-world RPC handlers.
//!
//! ```text
//! POST /twirp/hello.HelloWorldApi/HelloName   {"name": "Ada"}
//! POST /twirp/hello.HelloWorldApi/ReverseName {"name": "Ada"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::Word;

use super::RpcState;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameResponse {
    pub message: String,
}

/// Echo the given name in a canned greeting.
#[post("/hello.HelloWorldApi/HelloName")]
pub async fn hello_name(payload: web::Json<NameRequest>) -> web::Json<NameResponse> {
    web::Json(NameResponse {
        message: format!("Hello, {}!", payload.name),
    })
}

/// Return the given name, reversed.
#[post("/hello.HelloWorldApi/ReverseName")]
pub async fn reverse_name(
    state: web::Data<RpcState>,
    payload: web::Json<NameRequest>,
) -> web::Json<NameResponse> {
    let reversed = state.words.reverse_word(&Word::new(&*payload.name));

    web::Json(NameResponse {
        message: reversed.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockBannerRepository;
    use crate::inbound::rpc::RpcState;
    use crate::outbound::ReverseWordService;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn call(path: &str, body: Value) -> Value {
        let state = web::Data::new(RpcState {
            banners: Arc::new(MockBannerRepository::new()),
            words: Arc::new(ReverseWordService),
        });
        let app = actix_test::init_service(
            App::new()
                .service(crate::inbound::rpc::twirp_scope())
                .app_data(state),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(path)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        actix_test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn hello_name_greets() {
        let body = call(
            "/twirp/hello.HelloWorldApi/HelloName",
            json!({ "name": "Albus Dumbledore" }),
        )
        .await;

        assert_eq!(body["message"], "Hello, Albus Dumbledore!");
    }

    #[actix_web::test]
    async fn reverse_name_reverses() {
        let body = call(
            "/twirp/hello.HelloWorldApi/ReverseName",
            json!({ "name": "Albus Dumbledore" }),
        )
        .await;

        assert_eq!(body["message"], "erodelbmuD sublA");
    }
}
