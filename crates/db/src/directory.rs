//! Read paths for tools, news, bookmarks and votes.
//!
//! Every method here degrades instead of failing: a primary fetch error is
//! logged at `error` and yields an empty result, a relation error is logged
//! at `warn` and leaves that relation empty. Write paths live on the
//! repositories and propagate their errors.

use std::collections::{HashMap, HashSet};

use futures::join;
use sqlx::PgPool;
use tooldir_core::compliance::{TagScope, SCOPE_NEWS};
use tooldir_core::error::CoreError;
use tooldir_core::hydration::{load_relation, load_relation_pair, RelationMap};
use tooldir_core::tool_filter::{
    apply_filter, matches_any_slug, paginate, FeatureFlag, Pagination, ToolFilter,
};
use tooldir_core::types::DbId;
use tooldir_core::votes::{tally_votes, VoteCounts};

use crate::models::bookmark::BookmarkWithTool;
use crate::models::dashboard::{AdminDashboard, DashboardCounts, TaxonomyOptions};
use crate::models::news::{News, NewsView};
use crate::models::tag::Tag;
use crate::models::tool::{Tool, ToolView};
use crate::relations::{NewsTagSource, ToolCategorySource, ToolTagSource};
use crate::repositories::{
    BookmarkRepo, CategoryRepo, ClickEventRepo, NewsRepo, TagRepo, ToolRepo, UserRepo, VoteRepo,
};

/// Homepage featured strip size.
pub const FEATURED_LIMIT: u32 = 6;
/// Default size of the newest-tools list.
pub const NEWEST_DEFAULT_LIMIT: u32 = 8;
/// Number of similar tools on a detail page.
pub const SIMILAR_LIMIT: u32 = 3;
/// Default number of news items fetched before tag filtering.
pub const NEWS_DEFAULT_LIMIT: i64 = 50;
/// Rows per recent-activity list on the admin dashboard.
pub const DASHBOARD_RECENT_LIMIT: i64 = 5;

/// Unwrap a relation map or log and fall back to an empty one.
fn relation_or_empty<T>(result: Result<RelationMap<T>, CoreError>, relation: &str) -> RelationMap<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(relation, error = %e, "Failed to load relation, treating as empty");
        HashMap::new()
    })
}

/// Unwrap a count or log and fall back to zero.
fn count_or_zero(result: Result<i64, sqlx::Error>, table: &str) -> i64 {
    result.unwrap_or_else(|e| {
        tracing::warn!(table, error = %e, "Failed to count rows");
        0
    })
}

fn list_or_empty<T>(result: Result<Vec<T>, sqlx::Error>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(what, error = %e, "Failed to load list");
        Vec::new()
    })
}

/// Degrading read service over a shared pool.
#[derive(Clone)]
pub struct Directory {
    pool: PgPool,
}

impl Directory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // -----------------------------------------------------------------------
    // Tools
    // -----------------------------------------------------------------------

    /// Attach categories and tags, reconciling the legacy inline columns.
    pub async fn hydrate_tools(&self, tools: Vec<Tool>) -> Vec<ToolView> {
        if tools.is_empty() {
            return Vec::new();
        }
        let ids: Vec<DbId> = tools.iter().map(|tool| tool.id).collect();
        let (categories, tags) = load_relation_pair(
            &ToolCategorySource { pool: &self.pool },
            &ToolTagSource { pool: &self.pool },
            &ids,
        )
        .await;
        let mut categories = relation_or_empty(categories, "tool_categories");
        let mut tags = relation_or_empty(tags, "tool_tags");

        tools
            .into_iter()
            .map(|tool| {
                let tool_categories = categories.remove(&tool.id).unwrap_or_default();
                let tool_tags = tags.remove(&tool.id).unwrap_or_default();
                ToolView::hydrate(tool, tool_categories, tool_tags)
            })
            .collect()
    }

    /// Filtered, paginated tools, newest first.
    pub async fn tools(&self, filter: &ToolFilter, pagination: Pagination) -> Vec<ToolView> {
        let rows = match ToolRepo::list(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load tools");
                return Vec::new();
            }
        };
        let hydrated = self.hydrate_tools(rows).await;
        paginate(apply_filter(hydrated, filter), pagination)
    }

    /// Number of tools matching `filter`. Without active clauses this is a
    /// plain `COUNT(*)`.
    pub async fn tool_count(&self, filter: &ToolFilter) -> i64 {
        if !filter.has_active_clauses() {
            return ToolRepo::count(&self.pool).await.unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to count tools");
                0
            });
        }
        self.tools(filter, Pagination::default()).await.len() as i64
    }

    pub async fn tool_by_slug(&self, slug: &str) -> Option<ToolView> {
        let tool = match ToolRepo::find_by_slug(&self.pool, slug).await {
            Ok(tool) => tool?,
            Err(e) => {
                tracing::error!(slug, error = %e, "Failed to load tool");
                return None;
            }
        };
        self.hydrate_tools(vec![tool]).await.into_iter().next()
    }

    pub async fn featured_tools(&self) -> Vec<ToolView> {
        let filter = ToolFilter {
            feature_flags: vec![FeatureFlag::Featured],
            ..Default::default()
        };
        self.tools(&filter, Pagination::limited(FEATURED_LIMIT)).await
    }

    pub async fn newest_tools(&self, limit: Option<u32>) -> Vec<ToolView> {
        let limit = limit.unwrap_or(NEWEST_DEFAULT_LIMIT);
        self.tools(&ToolFilter::default(), Pagination::limited(limit))
            .await
    }

    /// Tools sharing at least one tag with `tool`. A tool without tags gets
    /// the newest tools instead, and the tool itself may appear.
    pub async fn similar_tools(&self, tool: &ToolView) -> Vec<ToolView> {
        let filter = ToolFilter {
            tags: tool.related_tag_slugs(),
            ..Default::default()
        };
        self.tools(&filter, Pagination::limited(SIMILAR_LIMIT)).await
    }

    /// Categories plus tool-scoped tags for the listing filters.
    pub async fn filter_options(&self) -> TaxonomyOptions {
        let scopes = TagScope::tool_filter_scopes();
        let (categories, tags) = join!(
            CategoryRepo::list(&self.pool),
            TagRepo::list_by_scopes(&self.pool, &scopes)
        );
        match (categories, tags) {
            (Ok(categories), Ok(tags)) => TaxonomyOptions { categories, tags },
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(error = %e, "Failed to load filter options");
                TaxonomyOptions::default()
            }
        }
    }

    /// Every category and tag, for the admin forms.
    pub async fn form_options(&self) -> TaxonomyOptions {
        let (categories, tags) = join!(CategoryRepo::list(&self.pool), TagRepo::list(&self.pool));
        TaxonomyOptions {
            categories: list_or_empty(categories, "categories"),
            tags: list_or_empty(tags, "tags"),
        }
    }

    // -----------------------------------------------------------------------
    // News
    // -----------------------------------------------------------------------

    async fn hydrate_news(&self, news: Vec<News>) -> Vec<NewsView> {
        if news.is_empty() {
            return Vec::new();
        }
        let ids: Vec<DbId> = news.iter().map(|item| item.id).collect();
        let mut tags = relation_or_empty(
            load_relation(&NewsTagSource { pool: &self.pool }, &ids).await,
            "news_tags",
        );
        news.into_iter()
            .map(|item| {
                let item_tags = tags.remove(&item.id).unwrap_or_default();
                NewsView::new(item, item_tags)
            })
            .collect()
    }

    /// Latest news (up to `limit`, default 50), then narrowed to items
    /// carrying any of `tags`.
    pub async fn news_list(&self, tags: &[String], limit: Option<i64>) -> Vec<NewsView> {
        let limit = limit.unwrap_or(NEWS_DEFAULT_LIMIT);
        let rows = match NewsRepo::list_published(&self.pool, limit).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load news");
                return Vec::new();
            }
        };
        let hydrated = self.hydrate_news(rows).await;
        if tags.is_empty() {
            return hydrated;
        }
        hydrated
            .into_iter()
            .filter(|item| matches_any_slug(item.tags.iter().map(|t| t.slug.as_str()), tags))
            .collect()
    }

    pub async fn news_by_slug(&self, slug: &str) -> Option<NewsView> {
        let news = match NewsRepo::find_by_slug(&self.pool, slug).await {
            Ok(news) => news?,
            Err(e) => {
                tracing::error!(slug, error = %e, "Failed to load news item");
                return None;
            }
        };
        self.hydrate_news(vec![news]).await.into_iter().next()
    }

    pub async fn news_tags(&self) -> Vec<Tag> {
        TagRepo::list_by_scopes(&self.pool, &[SCOPE_NEWS])
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to load news tags");
                Vec::new()
            })
    }

    // -----------------------------------------------------------------------
    // Bookmarks
    // -----------------------------------------------------------------------

    /// A user's bookmarks, newest first, each with its hydrated tool.
    pub async fn bookmarks_for_user(&self, user_id: DbId) -> Vec<BookmarkWithTool> {
        let bookmarks = match BookmarkRepo::list_for_user(&self.pool, user_id).await {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                tracing::error!(user_id, error = %e, "Failed to load bookmarks");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let tool_ids: Vec<DbId> = bookmarks
            .iter()
            .map(|b| b.tool_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let tools = if tool_ids.is_empty() {
            Vec::new()
        } else {
            match ToolRepo::find_by_ids(&self.pool, &tool_ids).await {
                Ok(rows) => self.hydrate_tools(rows).await,
                Err(e) => {
                    tracing::warn!(user_id, error = %e, "Failed to load bookmarked tools");
                    Vec::new()
                }
            }
        };
        let by_id: HashMap<DbId, ToolView> =
            tools.into_iter().map(|view| (view.tool.id, view)).collect();

        bookmarks
            .into_iter()
            .map(|bookmark| BookmarkWithTool {
                tool: by_id.get(&bookmark.tool_id).cloned(),
                bookmark,
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Votes
    // -----------------------------------------------------------------------

    /// Up/down counts per tool. Tools without votes are absent.
    pub async fn vote_counts(&self, tool_ids: &[DbId]) -> HashMap<DbId, VoteCounts> {
        if tool_ids.is_empty() {
            return HashMap::new();
        }
        match VoteRepo::rows_for_tools(&self.pool, tool_ids).await {
            Ok(rows) => tally_votes(&rows),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load tool votes");
                HashMap::new()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Admin
    // -----------------------------------------------------------------------

    /// Row counts plus the latest tools, news and clicks.
    pub async fn dashboard(&self) -> AdminDashboard {
        let pool = &self.pool;
        let (tools, news, users, bookmarks, clicks) = join!(
            ToolRepo::count(pool),
            NewsRepo::count(pool),
            UserRepo::count(pool),
            BookmarkRepo::count(pool),
            ClickEventRepo::count(pool),
        );
        let (recent_tools, recent_news, recent_clicks) = join!(
            ToolRepo::list_recent(pool, DASHBOARD_RECENT_LIMIT),
            NewsRepo::list_recent(pool, DASHBOARD_RECENT_LIMIT),
            ClickEventRepo::list_recent(pool, DASHBOARD_RECENT_LIMIT),
        );

        AdminDashboard {
            counts: DashboardCounts {
                tools: count_or_zero(tools, "tools"),
                news: count_or_zero(news, "news"),
                users: count_or_zero(users, "users"),
                bookmarks: count_or_zero(bookmarks, "bookmarks"),
                clicks: count_or_zero(clicks, "click_events"),
            },
            recent_tools: list_or_empty(recent_tools, "recent tools"),
            recent_news: list_or_empty(recent_news, "recent news"),
            recent_clicks: list_or_empty(recent_clicks, "recent clicks"),
        }
    }
}
