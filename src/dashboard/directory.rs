//! Robot Directory
//!
//! Snapshot of the robot list plus the single selected robot.

use serde::Serialize;

use super::error::{DashboardError, DashboardResult};
use crate::types::Robot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RobotDirectory {
    robots: Vec<Robot>,
    selected: Option<Selection>,
}

impl RobotDirectory {
    /// Replace the whole list. The selection survives a refresh.
    pub fn replace(&mut self, robots: Vec<Robot>) {
        self.robots = robots;
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    /// Select a listed robot by id, replacing any previous selection
    pub fn select(&mut self, id: &str) -> DashboardResult<&Selection> {
        let robot = self
            .robots
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| DashboardError::UnknownRobot(id.to_string()))?;

        let selection = self.selected.insert(Selection {
            id: robot.id.clone(),
            name: robot.name.clone(),
        });
        Ok(&*selection)
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.id.as_str())
    }

    /// Whether the list entry for `id` carries the active marker
    pub fn is_active(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> RobotDirectory {
        let mut dir = RobotDirectory::default();
        dir.replace(vec![
            Robot::new("r1", "Atlas", true),
            Robot::new("r2", "Boreas", false),
        ]);
        dir
    }

    #[test]
    fn test_single_active_entry() {
        let mut dir = directory();
        dir.select("r1").unwrap();
        dir.select("r2").unwrap();
        let active: Vec<_> = dir.robots().iter().filter(|r| dir.is_active(&r.id)).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "r2");
        assert_eq!(dir.selected().unwrap().name, "Boreas");
    }

    #[test]
    fn test_unknown_robot_keeps_selection() {
        let mut dir = directory();
        dir.select("r1").unwrap();
        let err = dir.select("r9").unwrap_err();
        assert!(matches!(err, DashboardError::UnknownRobot(id) if id == "r9"));
        assert_eq!(dir.selected_id(), Some("r1"));
    }

    #[test]
    fn test_replace_keeps_selection() {
        let mut dir = directory();
        dir.select("r2").unwrap();
        dir.replace(vec![Robot::new("r3", "Cirrus", true)]);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.selected_id(), Some("r2"));
        assert!(!dir.is_active("r3"));
    }
}
