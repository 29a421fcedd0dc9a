//! Dashboard metrics. Static demo figures until a pipeline store exists.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeToFill {
    pub month: &'static str,
    pub days: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceRoi {
    pub source: &'static str,
    pub hires: u32,
    pub roi: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunnelStage {
    pub name: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub stats: Vec<StatCard>,
    pub time_to_fill: Vec<TimeToFill>,
    pub source_roi: Vec<SourceRoi>,
    pub drop_off: Vec<FunnelStage>,
}

pub fn demo_metrics() -> DashboardMetrics {
    DashboardMetrics {
        stats: vec![
            StatCard {
                title: "Active Job Openings",
                value: "12",
                description: "+2 since last month",
            },
            StatCard {
                title: "Total Candidates",
                value: "1,250",
                description: "In pipeline across all roles",
            },
            StatCard {
                title: "Avg. Time to Fill",
                value: "28 days",
                description: "-5 days vs. last quarter",
            },
            StatCard {
                title: "Hires This Month",
                value: "5",
                description: "On track for quarterly goal",
            },
        ],
        time_to_fill: [("Jan", 30), ("Feb", 25), ("Mar", 28), ("Apr", 35), ("May", 32), ("Jun", 22)]
            .into_iter()
            .map(|(month, days)| TimeToFill { month, days })
            .collect(),
        source_roi: vec![
            SourceRoi { source: "LinkedIn", hires: 15, roi: 2.5 },
            SourceRoi { source: "BDJobs", hires: 25, roi: 3.1 },
            SourceRoi { source: "StackOverflow", hires: 10, roi: 1.8 },
            SourceRoi { source: "Referrals", hires: 30, roi: 4.5 },
        ],
        drop_off: [
            ("Applied", 200),
            ("Screened", 150),
            ("Interviewed", 80),
            ("Offered", 30),
            ("Hired", 25),
        ]
        .into_iter()
        .map(|(name, value)| FunnelStage { name, value })
        .collect(),
    }
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard() -> Json<DashboardMetrics> {
    Json(demo_metrics())
}
