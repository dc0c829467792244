// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::response::{Html, IntoResponse};

use crate::format::FormattedResult;

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
}

pub async fn home_page() -> HomeTemplate {
    HomeTemplate {
        title: "Farm Advisor".to_string(),
    }
}

// ============================================================================
// Prediction Form Pages
// ============================================================================

#[derive(Template)]
#[template(path = "pages/crop.html")]
pub struct CropTemplate {
    pub title: String,
    pub result: Option<FormattedResult>,
}

/// Render the crop page, optionally with a prediction outcome after a form
/// submission.
pub fn render_crop(result: Option<FormattedResult>) -> Html<String> {
    let template = CropTemplate {
        title: "Crop Recommendation".to_string(),
        result,
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

pub async fn crop_page() -> impl IntoResponse {
    render_crop(None)
}

#[derive(Template)]
#[template(path = "pages/fertilizer.html")]
pub struct FertilizerTemplate {
    pub title: String,
    pub result: Option<FormattedResult>,
}

pub fn render_fertilizer(result: Option<FormattedResult>) -> Html<String> {
    let template = FertilizerTemplate {
        title: "Fertilizer Recommendation".to_string(),
        result,
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

pub async fn fertilizer_page() -> impl IntoResponse {
    render_fertilizer(None)
}

#[derive(Template)]
#[template(path = "pages/yield.html")]
pub struct YieldTemplate {
    pub title: String,
    pub result: Option<FormattedResult>,
}

pub fn render_yield(result: Option<FormattedResult>) -> Html<String> {
    let template = YieldTemplate {
        title: "Yield Estimation".to_string(),
        result,
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

pub async fn yield_page() -> impl IntoResponse {
    render_yield(None)
}

// ============================================================================
// Info Pages
// ============================================================================

#[derive(Template)]
#[template(path = "pages/info.html")]
pub struct InfoTemplate {
    pub title: String,
    pub blurb: String,
}

fn info(title: &str, blurb: &str) -> InfoTemplate {
    InfoTemplate {
        title: title.to_string(),
        blurb: blurb.to_string(),
    }
}

pub async fn about_page() -> InfoTemplate {
    info(
        "About",
        "Farm Advisor turns soil readings and weather conditions into crop, \
         fertilizer and yield guidance using models trained on public \
         agronomic datasets.",
    )
}

pub async fn contact_page() -> InfoTemplate {
    info(
        "Contact",
        "Questions or data corrections are welcome; reach the maintainers \
         through the project repository.",
    )
}

pub async fn dashboard_page() -> InfoTemplate {
    info(
        "Dashboard",
        "Seasonal summaries and saved predictions will appear here.",
    )
}

pub async fn help_page() -> InfoTemplate {
    info(
        "Help",
        "Fill a form with your field's measurements and submit. Values \
         outside the accepted ranges are rejected with the offending field \
         named; unknown crop or soil names are reported back.",
    )
}

pub async fn login_page() -> InfoTemplate {
    info("Login", "Accounts are not enabled on this deployment.")
}

pub async fn profile_page() -> InfoTemplate {
    info("Profile", "Accounts are not enabled on this deployment.")
}

pub async fn register_page() -> InfoTemplate {
    info("Register", "Accounts are not enabled on this deployment.")
}
