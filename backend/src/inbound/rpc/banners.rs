//! Banner RPC handlers.
//!
//! One handler per method of the banners API:
//!
//! ```text
//! POST /twirp/banners.BannersApi/AddBanner    {"banner": {...}}
//! POST /twirp/banners.BannersApi/DeleteBanner {"bannerId": 1}
//! POST /twirp/banners.BannersApi/UpdateBanner {"bannerId": 1, "message": "..."}
//! POST /twirp/banners.BannersApi/GetBanner    {"bannerId": 1}
//! POST /twirp/banners.BannersApi/ListBanners  {"bannerIds": [1, 2]}
//! ```
//!
//! Handlers validate arguments, call the banner repository port, and map
//! records to wire shape. Message presence is enforced here, not in the
//! store.

use actix_web::{post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Banner, BannerPatch, BannerType};

use super::error::TwirpError;
use super::RpcState;

/// Wire representation of a banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerDto {
    pub banner_id: i64,
    pub banner_type: BannerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub repo_id: i64,
    pub creator_id: i64,
    pub message: String,
}

impl From<Banner> for BannerDto {
    fn from(banner: Banner) -> Self {
        Self {
            banner_id: banner.id,
            banner_type: banner.banner_type,
            expires_at: banner.expires_at,
            created_at: banner.created_at,
            repo_id: banner.repository_id,
            creator_id: banner.creator_id,
            message: banner.message,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddBannerRequest {
    pub banner: Option<BannerDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBannerResponse {
    pub banner: BannerDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteBannerRequest {
    pub banner_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteBannerResponse {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBannerRequest {
    pub banner_id: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBannerResponse {
    pub banner: BannerDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetBannerRequest {
    pub banner_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBannerResponse {
    pub banner: BannerDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListBannersRequest {
    pub banner_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBannersResponse {
    /// One entry per requested id when ids were given; unknown ids are
    /// `null` at their position.
    pub banners: Vec<Option<BannerDto>>,
}

/// Persist a new banner.
#[post("/banners.BannersApi/AddBanner")]
pub async fn add_banner(
    state: web::Data<RpcState>,
    payload: web::Json<AddBannerRequest>,
) -> Result<web::Json<AddBannerResponse>, TwirpError> {
    let banner = payload.into_inner().banner.unwrap_or_default();
    if banner.message.is_empty() {
        return Err(TwirpError::required_argument("banner.message"));
    }

    let stored = state
        .banners
        .add(banner.banner_type, banner.expires_at, &banner.message)
        .await?;

    Ok(web::Json(AddBannerResponse {
        banner: BannerDto::from(stored),
    }))
}

/// Delete the banner identified by id.
#[post("/banners.BannersApi/DeleteBanner")]
pub async fn delete_banner(
    state: web::Data<RpcState>,
    payload: web::Json<DeleteBannerRequest>,
) -> Result<web::Json<DeleteBannerResponse>, TwirpError> {
    state.banners.delete(payload.banner_id).await?;
    Ok(web::Json(DeleteBannerResponse {}))
}

/// Update the requested banner. Absent or empty fields stay unchanged.
#[post("/banners.BannersApi/UpdateBanner")]
pub async fn update_banner(
    state: web::Data<RpcState>,
    payload: web::Json<UpdateBannerRequest>,
) -> Result<web::Json<UpdateBannerResponse>, TwirpError> {
    let request = payload.into_inner();

    let patch = BannerPatch {
        expires_at: request.expires_at,
        // An empty message on the wire means "not set", matching proto3
        // zero-value semantics.
        message: request.message.filter(|message| !message.is_empty()),
    };

    let updated = state.banners.update(request.banner_id, patch).await?;

    Ok(web::Json(UpdateBannerResponse {
        banner: BannerDto::from(updated),
    }))
}

/// Return the banner with the given id.
#[post("/banners.BannersApi/GetBanner")]
pub async fn get_banner(
    state: web::Data<RpcState>,
    payload: web::Json<GetBannerRequest>,
) -> Result<web::Json<GetBannerResponse>, TwirpError> {
    let banner = state.banners.get(payload.banner_id).await?;

    Ok(web::Json(GetBannerResponse {
        banner: BannerDto::from(banner),
    }))
}

/// Return the banners with the given ids, or every banner when no ids were
/// supplied.
#[post("/banners.BannersApi/ListBanners")]
pub async fn list_banners(
    state: web::Data<RpcState>,
    payload: web::Json<ListBannersRequest>,
) -> Result<web::Json<ListBannersResponse>, TwirpError> {
    let request = payload.into_inner();

    let banners = state.banners.list(request.banner_ids).await?;

    Ok(web::Json(ListBannersResponse {
        banners: banners
            .into_iter()
            .map(|banner| banner.map(BannerDto::from))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockBannerRepository;
    use crate::outbound::ReverseWordService;
    use actix_web::{test as actix_test, App};
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn state_with(banners: MockBannerRepository) -> web::Data<RpcState> {
        web::Data::new(RpcState {
            banners: Arc::new(banners),
            words: Arc::new(ReverseWordService),
        })
    }

    fn sample_banner(id: i64, message: &str) -> Banner {
        Banner {
            id,
            banner_type: BannerType::Info,
            expires_at: None,
            created_at: Some(Utc::now()),
            repository_id: 0,
            creator_id: 0,
            message: message.to_owned(),
        }
    }

    async fn call(
        state: web::Data<RpcState>,
        path: &str,
        body: Value,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new().service(super::super::twirp_scope()).app_data(state),
        )
        .await;

        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(path)
                .set_json(body)
                .to_request(),
        )
        .await
    }

    #[actix_web::test]
    async fn add_banner_returns_the_stored_record() {
        let message =
            "The project will be undergoing regular maintenance on Saturday @ 9am PDT";
        let mut banners = MockBannerRepository::new();
        let stored = sample_banner(1, message);
        banners
            .expect_add()
            .withf(move |ty, expires, msg| {
                *ty == BannerType::Info && expires.is_none() && msg.contains("maintenance")
            })
            .return_once(move |_, _, _| Ok(stored));

        let res = call(
            state_with(banners),
            "/twirp/banners.BannersApi/AddBanner",
            json!({ "banner": { "bannerType": "Info", "message": message } }),
        )
        .await;

        assert!(res.status().is_success());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["banner"]["message"], message);
        assert_eq!(body["banner"]["bannerId"], 1);
    }

    #[actix_web::test]
    async fn add_banner_requires_a_message() {
        let res = call(
            state_with(MockBannerRepository::new()),
            "/twirp/banners.BannersApi/AddBanner",
            json!({ "banner": { "bannerType": "Warning" } }),
        )
        .await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_argument");
        assert_eq!(body["msg"], "banner.message is required");
    }

    #[actix_web::test]
    async fn get_banner_returns_wire_shape() {
        let mut banners = MockBannerRepository::new();
        let mut stored = sample_banner(1, "This is a test of the emergency broadcast system");
        stored.banner_type = BannerType::Warning;
        banners
            .expect_get()
            .withf(|id| *id == 1)
            .return_once(move |_| Ok(stored));

        let res = call(
            state_with(banners),
            "/twirp/banners.BannersApi/GetBanner",
            json!({ "bannerId": 1 }),
        )
        .await;

        assert!(res.status().is_success());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["banner"]["bannerType"], "Warning");
        assert_eq!(
            body["banner"]["message"],
            "This is a test of the emergency broadcast system"
        );
    }

    #[actix_web::test]
    async fn get_banner_maps_not_found() {
        let mut banners = MockBannerRepository::new();
        banners
            .expect_get()
            .return_once(|id| Err(crate::domain::ports::BannerRepositoryError::not_found(id)));

        let res = call(
            state_with(banners),
            "/twirp/banners.BannersApi/GetBanner",
            json!({ "bannerId": 404 }),
        )
        .await;

        assert_eq!(res.status(), actix_web::http::StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "not_found");
    }

    #[actix_web::test]
    async fn update_banner_treats_empty_message_as_unset() {
        let mut banners = MockBannerRepository::new();
        banners
            .expect_update()
            .withf(|id, patch| *id == 2 && patch.message.is_none() && patch.expires_at.is_some())
            .return_once(|id, _| Ok(sample_banner(id, "unchanged")));

        let res = call(
            state_with(banners),
            "/twirp/banners.BannersApi/UpdateBanner",
            json!({
                "bannerId": 2,
                "expiresAt": "2026-09-01T00:00:00Z",
                "message": ""
            }),
        )
        .await;

        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn list_banners_preserves_null_positions() {
        let mut banners = MockBannerRepository::new();
        banners
            .expect_list()
            .withf(|ids| *ids == Some(vec![1_i64, 99, 2]))
            .return_once(|_| {
                Ok(vec![
                    Some(sample_banner(1, "a")),
                    None,
                    Some(sample_banner(2, "b")),
                ])
            });

        let res = call(
            state_with(banners),
            "/twirp/banners.BannersApi/ListBanners",
            json!({ "bannerIds": [1, 99, 2] }),
        )
        .await;

        assert!(res.status().is_success());
        let body: Value = actix_test::read_body_json(res).await;
        let listed = body["banners"].as_array().expect("array");
        assert_eq!(listed.len(), 3);
        assert!(listed[1].is_null());
        assert_eq!(listed[2]["message"], "b");
    }

    #[actix_web::test]
    async fn delete_banner_returns_empty_object() {
        let mut banners = MockBannerRepository::new();
        banners.expect_delete().return_once(|_| Ok(()));

        let res = call(
            state_with(banners),
            "/twirp/banners.BannersApi/DeleteBanner",
            json!({ "bannerId": 3 }),
        )
        .await;

        assert!(res.status().is_success());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({}));
    }

    #[actix_web::test]
    async fn malformed_body_yields_twirp_malformed() {
        let app = actix_test::init_service(
            App::new()
                .service(super::super::twirp_scope())
                .app_data(state_with(MockBannerRepository::new())),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/twirp/banners.BannersApi/GetBanner")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "malformed");
    }
}
