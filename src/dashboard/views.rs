//! View Router
//!
//! Exactly one content panel is visible at a time; its nav link carries
//! the active marker and its title is the page title.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Dashboard,
    DataAnalysis,
    RobotControl,
    SystemStatus,
    Settings,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::DataAnalysis,
        View::RobotControl,
        View::SystemStatus,
        View::Settings,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::DataAnalysis => "dataAnalysis",
            View::RobotControl => "robotControl",
            View::SystemStatus => "systemStatus",
            View::Settings => "settings",
        }
    }

    /// Element id of the panel container
    pub fn panel_id(&self) -> String {
        format!("{}Content", self.slug())
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::DataAnalysis => "Data Analysis",
            View::RobotControl => "Robot Control",
            View::SystemStatus => "System Status",
            View::Settings => "Settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Live monitoring",
            View::DataAnalysis => "Data analysis",
            View::RobotControl => "Robot control",
            View::SystemStatus => "System status",
            View::Settings => "System settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.slug() == s)
            .ok_or_else(|| format!("unknown view: {}", s))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewRouter {
    active: View,
}

impl ViewRouter {
    /// Show `view`, hide every other panel, return the new page title
    pub fn navigate(&mut self, view: View) -> &'static str {
        self.active = view;
        view.title()
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn is_visible(&self, view: View) -> bool {
        self.active == view
    }

    pub fn page_title(&self) -> &'static str {
        self.active.title()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_visible() {
        let mut router = ViewRouter::default();
        assert_eq!(router.active(), View::Dashboard);

        let title = router.navigate(View::RobotControl);
        assert_eq!(title, "Robot control");
        assert_eq!(router.page_title(), "Robot control");
        let visible: Vec<_> = View::ALL.into_iter().filter(|v| router.is_visible(*v)).collect();
        assert_eq!(visible, vec![View::RobotControl]);
    }

    #[test]
    fn test_parse_slug() {
        assert_eq!("systemStatus".parse::<View>().unwrap(), View::SystemStatus);
        assert_eq!(View::DataAnalysis.panel_id(), "dataAnalysisContent");
        assert!("admin".parse::<View>().is_err());
    }
}
