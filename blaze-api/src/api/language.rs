//! Language API Handler

use axum::Json;
use blaze_core::domain::language::Language;
use blaze_core::dto::envelope::Envelope;
use blaze_core::dto::run::LanguageInfo;

/// GET /api/languages
/// List the languages accepted by /api/runners
pub async fn list_languages() -> Json<Envelope<Vec<LanguageInfo>>> {
    let languages = Language::ALL.into_iter().map(LanguageInfo::from).collect();
    Json(Envelope::ok(languages))
}
