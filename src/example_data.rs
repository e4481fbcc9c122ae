//! Demo data seeding.
//!
//! Mirrors the flat-file bulk import the project ships for demos: two fixture
//! accounts, a `date,product,sales_number,revenue` CSV whose every row is
//! recorded once per fixture user, and a city list with one
//! `<city name> <country name>` entry per line (the last word is the
//! country).

use thiserror::Error;
use tracing::info;

use crate::domain::hash_password;
use crate::domain::ports::{SaleRepository, StoreError};
use crate::domain::sale::{SaleDate, SaleDraft};
use crate::domain::user::{User, UserId};
use crate::outbound::persistence::InMemoryStore;

/// Fixture credentials created by [`seed_demo_accounts`].
pub const DEMO_ACCOUNTS: [(&str, &str); 2] = [
    ("user1@gmail.com", "user1_pass"),
    ("user2@gmail.com", "user2_pass"),
];

const SALES_COLUMNS: [&str; 4] = ["date", "product", "sales_number", "revenue"];

/// Failures raised while seeding demo data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The sales file had no header row.
    #[error("sales file is missing the header row")]
    MissingHeader,
    /// The header row lacks a required column.
    #[error("sales header is missing the `{0}` column")]
    MissingColumn(&'static str),
    /// A data row could not be parsed.
    #[error("line {line}: {detail}")]
    BadRow {
        /// 1-based line number in the input.
        line: usize,
        /// What was wrong with the row.
        detail: String,
    },
    /// Password hashing failed while creating a fixture account.
    #[error("password hashing failed")]
    Hash(#[source] crate::domain::Error),
    /// The store rejected an insert.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn bad_row(line: usize, detail: impl Into<String>) -> SeedError {
    SeedError::BadRow {
        line,
        detail: detail.into(),
    }
}

/// Create the two fixture accounts and return their profiles.
pub fn seed_demo_accounts(store: &InMemoryStore) -> Result<Vec<User>, SeedError> {
    let mut users = Vec::with_capacity(DEMO_ACCOUNTS.len());
    for (email, password) in DEMO_ACCOUNTS {
        let hash = hash_password(password).map_err(SeedError::Hash)?;
        let user = store.add_account(email, email, hash)?;
        info!(user = %user.email, id = %user.id, "seeded demo account");
        users.push(user);
    }
    Ok(users)
}

/// Import a sales CSV, recording each row once per owner in `owners`.
///
/// Returns the number of sales inserted. Any malformed row aborts the whole
/// import with a line-numbered error.
pub async fn import_sales_csv(
    store: &InMemoryStore,
    content: &str,
    owners: &[UserId],
) -> Result<usize, SeedError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or(SeedError::MissingHeader)?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let mut indices = [0usize; SALES_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(SALES_COLUMNS) {
        *slot = columns
            .iter()
            .position(|column| *column == name)
            .ok_or(SeedError::MissingColumn(name))?;
    }
    let [date_at, product_at, units_at, revenue_at] = indices;

    let mut inserted = 0usize;
    for (number, line) in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let field = |at: usize, name: &str| {
            fields
                .get(at)
                .copied()
                .ok_or_else(|| bad_row(number, format!("missing `{name}` value")))
        };

        let date = SaleDate::parse(field(date_at, "date")?)
            .map_err(|err| bad_row(number, err.to_string()))?;
        let product = field(product_at, "product")?.to_owned();
        let sales_number: u32 = field(units_at, "sales_number")?
            .parse()
            .map_err(|_| bad_row(number, "`sales_number` must be a non-negative integer"))?;
        let revenue: f64 = field(revenue_at, "revenue")?
            .parse()
            .map_err(|_| bad_row(number, "`revenue` must be a number"))?;

        for owner in owners {
            let draft = SaleDraft {
                date,
                product: product.clone(),
                sales_number,
                revenue,
            };
            store.insert(*owner, draft).await?;
            inserted += 1;
        }
    }

    info!(count = inserted, "imported demo sales");
    Ok(inserted)
}

/// Import a city list, creating countries on first sight.
///
/// Returns the number of cities created.
pub async fn import_city_list(store: &InMemoryStore, content: &str) -> Result<usize, SeedError> {
    let mut created = 0usize;
    for line in content.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((country, city_words)) = words.split_last() else {
            continue;
        };
        let city = city_words.join(" ");
        let country_id = store.ensure_country(country)?;
        store.add_city(country_id, &city)?;
        created += 1;
    }

    info!(count = created, "imported demo cities");
    Ok(created)
}
