//! Startup data: the protected admin account and optional sample content.

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::{info, instrument};

use models::{article, faq, grave, section, service_item, user};
use crate::auth::{
    domain::RegisterInput,
    errors::AuthError,
    repo::SeaOrmAuthRepository,
    service::AuthConfig,
    AuthService,
};
use crate::errors::ServiceError;

/// Which tables received sample rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub sections: usize,
    pub graves: usize,
    pub articles: usize,
    pub faqs: usize,
    pub services: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.sections + self.graves + self.articles + self.faqs + self.services
    }
}

/// Create the `admin` user when it is missing. Returns whether one was created.
#[instrument(skip(db, password))]
pub async fn ensure_admin(db: &DatabaseConnection, password: &str) -> Result<bool, ServiceError> {
    let auth = AuthService::new(
        Arc::new(SeaOrmAuthRepository::new(db.clone())),
        AuthConfig { login_token: String::new() },
    );
    let input = RegisterInput {
        username: user::PROTECTED_USERNAME.to_string(),
        password: password.to_string(),
        role: user::ROLE_ADMIN.to_string(),
    };
    match auth.register(input).await {
        Ok(u) => {
            info!(user_id = u.id, "admin user created");
            Ok(true)
        }
        Err(AuthError::Conflict) => Ok(false),
        Err(e) => Err(ServiceError::Internal(e.to_string())),
    }
}

async fn is_empty<E>(db: &DatabaseConnection) -> Result<bool, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let n = E::find().count(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(n == 0)
}

async fn insert_all<A>(db: &DatabaseConnection, rows: Vec<A>) -> Result<usize, ServiceError>
where
    A: ActiveModelTrait + 'static,
{
    let n = rows.len();
    <A::Entity as EntityTrait>::insert_many(rows)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(n)
}

fn sample_sections() -> Vec<section::ActiveModel> {
    [("A", "Sektor główny"), ("B", "Sektor boczny")]
        .into_iter()
        .map(|(name, description)| section::ActiveModel {
            name: Set(name.into()),
            description: Set(Some(description.into())),
            rows: Set(4),
            cols: Set(6),
            ..Default::default()
        })
        .collect()
}

fn sample_graves() -> Vec<grave::ActiveModel> {
    vec![grave::ActiveModel {
        name: Set("Jan Kowalski".into()),
        birth_date: Set(Some("1950-01-01".into())),
        death_date: Set(Some("2020-12-31".into())),
        section: Set(Some("A".into())),
        row: Set(Some("1".into())),
        plot: Set(Some("1".into())),
        coord_x: Set(0),
        coord_y: Set(0),
        ..Default::default()
    }]
}

fn sample_articles() -> Vec<article::ActiveModel> {
    [
        (
            "Wybór odpowiedniego materiału na nagrobek: kompletny przewodnik",
            "Zrozumienie różnic pomiędzy granitem, marmurem i brązem pomaga podjąć trwałą decyzję.",
            "Granit jest najtrwalszy, marmur piękny ale delikatny, a brąz klasyczny.",
            "2024-11-15",
            "Materiały",
            "5 minut czytania",
        ),
        (
            "Konserwacja nagrobków: porady dotyczące pielęgnacji sezonowej",
            "Jak pielęgnować nagrobki w różnych porach roku.",
            "Wiosną należy usunąć liście, latem myć wodą, jesienią zabezpieczyć przed mrozem.",
            "2024-11-10",
            "Konserwacja",
            "4 minuty czytania",
        ),
        (
            "Historia symboliki cmentarnej",
            "Znaczenie symboli spotykanych na nagrobkach.",
            "Anioł oznacza opiekę, gołąb pokój, a złamana kolumna przerwane życie.",
            "2024-11-05",
            "Historia",
            "7 minut czytania",
        ),
    ]
    .into_iter()
    .map(|(title, excerpt, content, date, category, read_time)| article::ActiveModel {
        title: Set(title.into()),
        excerpt: Set(Some(excerpt.into())),
        content: Set(content.into()),
        date: Set(Some(date.into())),
        category: Set(Some(category.into())),
        read_time: Set(Some(read_time.into())),
        is_visible: Set(true),
        ..Default::default()
    })
    .collect()
}

fn sample_faqs() -> Vec<faq::ActiveModel> {
    [
        ("Jak znaleźć grób?", "Użyj wyszukiwarki na stronie głównej wpisując imię i nazwisko zmarłego."),
        ("Jak zamówić usługę?", "Przejdź do zakładki \"Usługi\", wybierz grób i wypełnij formularz."),
        ("Czy cmentarz jest otwarty w święta?", "Tak, cmentarz jest otwarty codziennie od 7:00 do 21:00."),
        ("Jak zgłosić usterkę?", "Skontaktuj się z biurem administracji telefonicznie lub mailowo."),
    ]
    .into_iter()
    .zip(0..)
    .map(|((question, answer), order)| faq::ActiveModel {
        question: Set(question.into()),
        answer: Set(answer.into()),
        display_order: Set(order),
        ..Default::default()
    })
    .collect()
}

fn sample_services() -> Vec<service_item::ActiveModel> {
    [("Czyszczenie nagrobków", "czyszczenie", 150.0), ("Naprawa nagrobków", "naprawa", 300.0)]
        .into_iter()
        .map(|(name, slug, price)| service_item::ActiveModel {
            name: Set(name.into()),
            slug: Set(Some(slug.into())),
            price: Set(Some(price)),
            category: Set(Some("primary".into())),
            ..Default::default()
        })
        .collect()
}

/// Fill each empty content table with sample rows. Tables that already hold
/// data are left untouched, so this is safe to run on every start.
#[instrument(skip(db))]
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();
    if is_empty::<section::Entity>(db).await? {
        report.sections = insert_all(db, sample_sections()).await?;
    }
    if is_empty::<grave::Entity>(db).await? {
        report.graves = insert_all(db, sample_graves()).await?;
    }
    if is_empty::<article::Entity>(db).await? {
        report.articles = insert_all(db, sample_articles()).await?;
    }
    if is_empty::<faq::Entity>(db).await? {
        report.faqs = insert_all(db, sample_faqs()).await?;
    }
    if is_empty::<service_item::Entity>(db).await? {
        report.services = insert_all(db, sample_services()).await?;
    }
    info!(?report, "sample data seeded");
    Ok(report)
}
