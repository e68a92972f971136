//! Repository for the `newsletter_subscriptions` table.

use sqlx::PgPool;
use tooldir_core::newsletter::{SubscribeOutcome, Subscription};

use crate::models::newsletter::NewsletterSubscription;

const COLUMNS: &str = "id, email, consent, created_at";

pub struct NewsletterRepo;

impl NewsletterRepo {
    /// Insert a subscription. An address that is already subscribed is left
    /// untouched and reported as [`SubscribeOutcome::AlreadySubscribed`].
    pub async fn subscribe(
        pool: &PgPool,
        input: &Subscription,
    ) -> Result<SubscribeOutcome, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO newsletter_subscriptions (email, consent) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_newsletter_subscriptions_email DO NOTHING \
             RETURNING id",
        )
        .bind(&input.email)
        .bind(input.consent)
        .fetch_optional(pool)
        .await?;

        Ok(match inserted {
            Some(_) => SubscribeOutcome::Subscribed,
            None => SubscribeOutcome::AlreadySubscribed,
        })
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM newsletter_subscriptions WHERE email = $1");
        sqlx::query_as::<_, NewsletterSubscription>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
