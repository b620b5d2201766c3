use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;

use beacon_database::{Database, Incident, IncidentCategory, IncidentStatus, User};
use beacon_result::{create_error, Result};

fn default_true() -> bool {
    true
}

/// # Incident Data
#[derive(Deserialize, schemars::JsonSchema)]
pub struct DataCreateIncident {
    /// Short headline
    pub title: String,
    /// What happened
    pub description: String,
    /// Incident category
    pub category: IncidentCategory,
    /// Free-form location description
    pub location: String,
    /// Map latitude, if the reporter shared it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Map longitude, if the reporter shared it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Area to file in, defaults to the caller's home area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
    /// Opaque URL of an already-uploaded photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether other members may message the reporter about this
    #[serde(default = "default_true")]
    pub allow_messages: bool,
}

/// # Create Incident
///
/// File a new incident report. Reports caught by the spam filter are
/// stored in rejected status and the request fails with
/// `IncidentFlaggedAsSpam` carrying the stored report so clients can
/// still display it.
#[openapi(tag = "Incidents")]
#[post("/", data = "<data>")]
pub async fn create_incident(
    db: &State<Database>,
    user: User,
    data: Json<DataCreateIncident>,
) -> Result<Json<Incident>> {
    if user.is_suspended() {
        return Err(create_error!(Suspended));
    }

    let data = data.into_inner();

    let config = beacon_config::config().await;
    let limits = config.features.limits;
    if data.title.trim().is_empty() || data.title.len() > limits.title_length {
        return Err(create_error!(FailedValidation {
            error: format!("title must be 1 to {} characters", limits.title_length)
        }));
    }

    if data.description.trim().is_empty() || data.description.len() > limits.description_length {
        return Err(create_error!(FailedValidation {
            error: format!(
                "description must be 1 to {} characters",
                limits.description_length
            )
        }));
    }

    // File into the caller's home area unless one is given explicitly
    let code = data
        .area_code
        .or_else(|| user.area_code.clone())
        .ok_or_else(|| create_error!(UnknownAreaCode))?
        .to_uppercase();

    let area = db.fetch_area_code_by_code(&code).await?;
    if !area.active {
        return Err(create_error!(UnknownAreaCode));
    }

    let incident = Incident::create(
        db,
        &user,
        data.title,
        data.description,
        data.category,
        data.location,
        data.latitude,
        data.longitude,
        area.code,
        data.image_url,
        data.allow_messages,
    )
    .await?;

    // The spam filter already persisted and rejected it
    if incident.status == IncidentStatus::Rejected {
        return Err(create_error!(IncidentFlaggedAsSpam {
            incident: serde_json::to_value(&incident)
                .map_err(|_| create_error!(InternalError))?
        }));
    }

    Ok(Json(incident))
}

#[cfg(test)]
mod test {
    use rocket::http::{ContentType, Header, Status};

    use crate::util::test::TestHarness;
    use beacon_database::{IncidentStatus, PartialUser};

    #[rocket::async_test]
    async fn spam_rejection_carries_the_stored_record() {
        let harness = TestHarness::new().await;
        let area = harness.new_area().await;
        let (_, session) = harness.new_user("reporter@example.com").await;

        let response = harness
            .post("/incidents")
            .header(ContentType::JSON)
            .header(Header::new("x-session-token", session.token.to_string()))
            .body(
                serde_json::json!({
                    "title": "xkcbldf",
                    "description": "Something legitimate happened here.",
                    "category": "other",
                    "location": "Somewhere",
                    "area_code": area.code,
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);

        let body: serde_json::Value =
            serde_json::from_str(&response.into_string().await.expect("body")).expect("json");
        assert_eq!(body["type"], "IncidentFlaggedAsSpam");

        // The full rejected record rides along in the error payload
        assert_eq!(body["incident"]["title"], "xkcbldf");
        assert_eq!(body["incident"]["status"], "rejected");

        let id = body["incident"]["_id"].as_str().expect("id");
        let stored = harness.db.fetch_incident(id).await.expect("`Incident`");
        assert_eq!(stored.status, IncidentStatus::Rejected);
    }

    #[rocket::async_test]
    async fn suspended_reporters_cannot_file() {
        let harness = TestHarness::new().await;
        let area = harness.new_area().await;
        let (mut user, session) = harness.new_user("banned@example.com").await;

        user.update(
            &harness.db,
            PartialUser {
                suspended: Some(true),
                ..Default::default()
            },
            vec![],
        )
        .await
        .expect("suspension");

        let response = harness
            .post("/incidents")
            .header(ContentType::JSON)
            .header(Header::new("x-session-token", session.token.to_string()))
            .body(
                serde_json::json!({
                    "title": "Broken streetlight",
                    "description": "The light has been out for a week.",
                    "category": "hazard",
                    "location": "Main Street",
                    "area_code": area.code,
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Forbidden);
        let body = response.into_string().await.expect("body");
        assert!(body.contains("Suspended"));
    }
}
