//! Aggregate views for the admin dashboard and form/filter option lists.

use serde::Serialize;

use crate::models::category::Category;
use crate::models::click_event::RecentClick;
use crate::models::news::NewsSummary;
use crate::models::tag::Tag;
use crate::models::tool::ToolSummary;

/// Row counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub tools: i64,
    pub news: i64,
    pub users: i64,
    pub bookmarks: i64,
    pub clicks: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub counts: DashboardCounts,
    pub recent_tools: Vec<ToolSummary>,
    pub recent_news: Vec<NewsSummary>,
    pub recent_clicks: Vec<RecentClick>,
}

/// Categories and tags offered by a listing or form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaxonomyOptions {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}
