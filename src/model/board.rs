use crate::model::{generate_id, Audit, Id};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Work package attribute a board's lists are keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionAttribute {
    Status,
    Version,
    Assignee,
}

impl ActionAttribute {
    /// Filter and schema key of the attribute
    pub fn attribute_name(&self) -> &'static str {
        match self {
            ActionAttribute::Status => "status",
            ActionAttribute::Version => "version",
            ActionAttribute::Assignee => "assignee",
        }
    }

    pub fn all() -> [ActionAttribute; 3] {
        [
            ActionAttribute::Status,
            ActionAttribute::Version,
            ActionAttribute::Assignee,
        ]
    }
}

impl fmt::Display for ActionAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

impl FromStr for ActionAttribute {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionAttribute::all()
            .into_iter()
            .find(|attr| attr.attribute_name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown action attribute: {}", s))
    }
}

/// One column of a board, backed by a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    pub query_id: Id,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: Id,
    pub name: String,
    /// Free boards carry no action attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_attribute: Option<ActionAttribute>,
    pub lists: Vec<BoardList>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Board {
    pub fn new(name: impl Into<String>, action_attribute: Option<ActionAttribute>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            action_attribute,
            lists: Vec::new(),
            audit: Audit::now(),
        }
    }

    pub fn is_action_board(&self) -> bool {
        self.action_attribute.is_some()
    }

    /// Append a list for the query at the end of the board
    pub fn add_list(&mut self, query_id: Id) {
        let position = self.lists.len();
        self.lists.push(BoardList { query_id, position });
        self.audit.touch();
    }

    pub fn remove_list(&mut self, query_id: &str) -> bool {
        let before = self.lists.len();
        self.lists.retain(|list| list.query_id != query_id);
        for (position, list) in self.lists.iter_mut().enumerate() {
            list.position = position;
        }
        self.audit.touch();
        before != self.lists.len()
    }

    pub fn query_ids(&self) -> Vec<Id> {
        self.lists.iter().map(|list| list.query_id.clone()).collect()
    }
}

/// Input model for creating a new board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBoard {
    pub name: String,
    #[serde(default)]
    pub action_attribute: Option<ActionAttribute>,
}

impl NewBoard {
    pub fn into_board(self) -> Board {
        Board::new(self.name, self.action_attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_attribute_parsing() {
        assert_eq!("status".parse::<ActionAttribute>().unwrap(), ActionAttribute::Status);
        assert_eq!("assignee".parse::<ActionAttribute>().unwrap(), ActionAttribute::Assignee);
        assert!("priority".parse::<ActionAttribute>().is_err());
    }

    #[test]
    fn test_list_positions_stay_dense() {
        let mut board = Board::new("Kanban", Some(ActionAttribute::Status));
        board.add_list("q1".to_string());
        board.add_list("q2".to_string());
        board.add_list("q3".to_string());

        assert!(board.remove_list("q2"));
        assert!(!board.remove_list("missing"));

        let positions: Vec<(Id, usize)> = board
            .lists
            .iter()
            .map(|list| (list.query_id.clone(), list.position))
            .collect();
        assert_eq!(positions, vec![("q1".to_string(), 0), ("q3".to_string(), 1)]);
    }
}
