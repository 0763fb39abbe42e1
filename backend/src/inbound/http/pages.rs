//! Public landing page.

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::session_user;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::HomePage;

/// Render the home page for anyone, noting who is signed in.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page", body = HomePage),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["notes"],
    operation_id = "home",
    security([])
)]
#[get("/")]
pub async fn home(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<HomePage>> {
    let user = session_user(&session, &state).await?;
    Ok(web::Json(HomePage::for_user(user.as_ref())))
}
