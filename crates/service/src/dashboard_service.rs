//! Admin dashboard: row counts plus a flat calendar of dated events.

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use models::{contact_message, grave, reservation, service_request};
use crate::errors::ServiceError;
use crate::normalize::RequestStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub graves: u64,
    pub requests: u64,
    pub messages: u64,
    pub reservations: u64,
}

/// One calendar entry. `id` is `<type>_<row id>`, `date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub date: String,
    pub status: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub events: Vec<DashboardEvent>,
}

impl From<service_request::Model> for DashboardEvent {
    fn from(m: service_request::Model) -> Self {
        let date = m.scheduled_date.filter(|d| !d.trim().is_empty()).unwrap_or(m.date);
        Self {
            id: format!("request_{}", m.id),
            kind: "request".into(),
            title: format!("{} (#{})", m.service_type, m.grave_id),
            date,
            status: RequestStatus::parse(&m.status).to_string(),
            details: m.contact_name.or(m.notes),
        }
    }
}

fn reservation_event(m: reservation::Model) -> Option<DashboardEvent> {
    let date = m.scheduled_date.filter(|d| !d.trim().is_empty())?;
    Some(DashboardEvent {
        id: format!("reservation_{}", m.id),
        kind: "reservation".into(),
        title: m.name,
        date,
        status: m.status,
        details: m.plot_type.or(m.section),
    })
}

impl From<contact_message::Model> for DashboardEvent {
    fn from(m: contact_message::Model) -> Self {
        Self {
            id: format!("message_{}", m.id),
            kind: "message".into(),
            title: m.name,
            date: m.created_at.format("%Y-%m-%d").to_string(),
            status: m.status,
            details: Some(m.email),
        }
    }
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

pub async fn dashboard(db: &DatabaseConnection) -> Result<DashboardView, ServiceError> {
    let stats = DashboardStats {
        graves: grave::Entity::find().count(db).await.map_err(db_err)?,
        requests: service_request::Entity::find().count(db).await.map_err(db_err)?,
        messages: contact_message::Entity::find().count(db).await.map_err(db_err)?,
        reservations: reservation::Entity::find().count(db).await.map_err(db_err)?,
    };

    let requests = service_request::Entity::find()
        .order_by_asc(service_request::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?;
    let reservations = reservation::Entity::find()
        .order_by_asc(reservation::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?;
    let messages = contact_message::Entity::find()
        .order_by_asc(contact_message::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?;

    let mut events: Vec<DashboardEvent> = requests.into_iter().map(DashboardEvent::from).collect();
    events.extend(reservations.into_iter().filter_map(reservation_event));
    events.extend(messages.into_iter().map(DashboardEvent::from));
    Ok(DashboardView { stats, events })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact_service::{create_message, CreateContactInput};
    use crate::grave_service::{create_grave, CreateGraveInput};
    use crate::reservation_service::{create_reservation, CreateReservationInput};
    use crate::service_request_service::{create_service_request, CreateServiceRequestInput};
    use crate::test_support::get_db;

    #[tokio::test]
    async fn empty_dashboard() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert_eq!(dashboard(&db).await?, DashboardView::default());
        Ok(())
    }

    #[tokio::test]
    async fn events_from_requests_reservations_and_messages() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let g = create_grave(&db, CreateGraveInput { name: Some("Jan".into()), ..Default::default() }).await?;
        let scheduled = create_service_request(
            &db,
            CreateServiceRequestInput {
                grave_id: Some(g.id),
                service_type: Some("cleaning".into()),
                date: Some("2024-05-01".into()),
                scheduled_date: Some("2024-05-10".into()),
                status: Some("w trakcie".into()),
                ..Default::default()
            },
        )
        .await?;
        let unscheduled = create_service_request(
            &db,
            CreateServiceRequestInput {
                grave_id: Some(g.id),
                service_type: Some("flowers".into()),
                date: Some("2024-06-01".into()),
                ..Default::default()
            },
        )
        .await?;
        let with_date = create_reservation(
            &db,
            CreateReservationInput {
                name: Some("Anna".into()),
                email: Some("a@x.pl".into()),
                phone: Some("123".into()),
                scheduled_date: Some("2024-07-01".into()),
                ..Default::default()
            },
        )
        .await?;
        create_reservation(
            &db,
            CreateReservationInput {
                name: Some("Piotr".into()),
                email: Some("p@x.pl".into()),
                phone: Some("456".into()),
                ..Default::default()
            },
        )
        .await?;
        let msg = create_message(
            &db,
            CreateContactInput {
                name: Some("Ewa".into()),
                email: Some("e@x.pl".into()),
                message: Some("hello".into()),
                ..Default::default()
            },
        )
        .await?;

        let view = dashboard(&db).await?;
        assert_eq!(view.stats, DashboardStats { graves: 1, requests: 2, messages: 1, reservations: 2 });

        let ids: Vec<&str> = view.events.iter().map(|e| e.id.as_str()).collect();
        let expected = [
            format!("request_{}", scheduled.id),
            format!("request_{}", unscheduled.id),
            format!("reservation_{}", with_date.id),
            format!("message_{}", msg.id),
        ];
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());

        assert_eq!(view.events[0].date, "2024-05-10");
        assert_eq!(view.events[0].status, "in_progress");
        assert_eq!(view.events[1].date, "2024-06-01");
        assert_eq!(view.events[2].date, "2024-07-01");
        assert_eq!(view.events[3].kind, "message");
        assert_eq!(view.events[3].date.len(), 10);
        assert_eq!(view.events[3].status, "unread");
        Ok(())
    }
}
