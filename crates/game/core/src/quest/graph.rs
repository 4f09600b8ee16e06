//! Static quest graph definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::payload::{lossy, ConnectionPayload, FlagValue, NodePayload, WorldFlags};
use super::prereq::QuestPrereqs;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident($inner:ty)) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(
    /// Identifier of a quest definition.
    QuestId(u32)
);
id_newtype!(
    /// Identifier of a node within a quest graph.
    NodeId(u32)
);
id_newtype!(
    /// Identifier of a connection within a quest graph.
    ConnectionId(u32)
);
id_newtype!(
    /// Identifier of a player.
    UserId(u64)
);

/// Role of a node in the graph.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Start,
    #[default]
    Choice,
    Action,
    Condition,
    End,
}

/// How a connection is offered to the player.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionKind {
    #[default]
    Choice,
    Condition,
    Default,
}

/// One node of a quest graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestNode {
    pub id: NodeId,
    #[serde(default, rename = "type")]
    pub kind: NodeKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lossy")]
    pub payload: NodePayload,
    #[serde(default)]
    pub is_start: bool,
    #[serde(default)]
    pub is_final: bool,
}

/// One directed edge of a quest graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestConnection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default, rename = "type")]
    pub kind: ConnectionKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default, deserialize_with = "lossy")]
    pub payload: ConnectionPayload,
}

/// Position of a quest inside a multi-quest chain.
///
/// Completion records the chain step as world flags so later quests can gate
/// on it through ordinary prerequisites.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestChain {
    pub id: String,
    pub step: u32,
}

impl QuestChain {
    /// Flags written when the owning quest completes.
    pub fn completion_flags(&self) -> WorldFlags {
        let mut flags = WorldFlags::new();
        flags.insert(format!("{}.step", self.id), FlagValue::Int(i64::from(self.step)));
        flags.insert(format!("{}.completed", self.id), FlagValue::Bool(true));
        flags
    }
}

/// A complete quest graph, immutable at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestDefinition {
    pub id: QuestId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prereqs: QuestPrereqs,
    #[serde(default)]
    pub chain: Option<QuestChain>,
    pub nodes: Vec<QuestNode>,
    pub connections: Vec<QuestConnection>,
}

impl QuestDefinition {
    /// The unique start node. Definitions are validated at load time, so a
    /// missing start node only occurs with hand-built test graphs.
    pub fn start_node(&self) -> Option<&QuestNode> {
        self.nodes.iter().find(|node| node.is_start)
    }

    pub fn node(&self, id: NodeId) -> Option<&QuestNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&QuestConnection> {
        self.connections.iter().find(|conn| conn.id == id)
    }

    /// Outgoing connections from a node, in display order.
    pub fn connections_from(&self, node: NodeId) -> Vec<&QuestConnection> {
        let mut outgoing: Vec<&QuestConnection> = self
            .connections
            .iter()
            .filter(|conn| conn.from == node)
            .collect();
        outgoing.sort_by_key(|conn| (conn.order, conn.id));
        outgoing
    }
}

/// Read-only lookup into the loaded quest definitions.
pub trait QuestCatalog: Send + Sync {
    fn quest(&self, id: QuestId) -> Option<&QuestDefinition>;

    fn quests(&self) -> Vec<&QuestDefinition>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, is_start: bool, is_final: bool) -> QuestNode {
        QuestNode {
            id: NodeId(id),
            kind: if is_start { NodeKind::Start } else { NodeKind::Choice },
            title: format!("node {id}"),
            description: String::new(),
            payload: NodePayload::default(),
            is_start,
            is_final,
        }
    }

    fn connection(id: u32, from: u32, to: u32, order: i32) -> QuestConnection {
        QuestConnection {
            id: ConnectionId(id),
            from: NodeId(from),
            to: NodeId(to),
            kind: ConnectionKind::Choice,
            label: None,
            order,
            payload: ConnectionPayload::default(),
        }
    }

    fn quest() -> QuestDefinition {
        QuestDefinition {
            id: QuestId(1),
            title: "Test".into(),
            description: String::new(),
            prereqs: QuestPrereqs::default(),
            chain: None,
            nodes: vec![node(1, true, false), node(2, false, false), node(3, false, true)],
            connections: vec![
                connection(11, 1, 3, 2),
                connection(10, 1, 2, 1),
                connection(12, 2, 3, 1),
            ],
        }
    }

    #[test]
    fn start_node_is_the_flagged_one() {
        assert_eq!(quest().start_node().map(|n| n.id), Some(NodeId(1)));
    }

    #[test]
    fn connections_from_respects_order() {
        let quest = quest();
        let outgoing = quest.connections_from(NodeId(1));
        let ids: Vec<ConnectionId> = outgoing.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ConnectionId(10), ConnectionId(11)]);
    }

    #[test]
    fn chain_completion_flags_record_step_and_completion() {
        let chain = QuestChain {
            id: "dragon_saga".into(),
            step: 2,
        };
        let flags = chain.completion_flags();
        assert_eq!(flags.get("dragon_saga.step"), Some(&FlagValue::Int(2)));
        assert_eq!(
            flags.get("dragon_saga.completed"),
            Some(&FlagValue::Bool(true))
        );
    }

    #[test]
    fn definition_parses_from_stored_json() {
        let raw = r#"{
            "id": 7,
            "title": "Cellar Rats",
            "nodes": [
                {"id": 1, "type": "start", "title": "Cellar door", "is_start": true},
                {"id": 2, "type": "end", "title": "Done", "is_final": true,
                 "payload": {"world_flags": {"set": {"cellar.cleared": true}}}}
            ],
            "connections": [
                {"id": 1, "from": 1, "to": 2, "label": "Go in"}
            ]
        }"#;
        let quest: QuestDefinition = serde_json::from_str(raw).unwrap();
        assert_eq!(quest.id, QuestId(7));
        assert_eq!(quest.start_node().map(|n| n.id), Some(NodeId(1)));
        let end = quest.node(NodeId(2)).unwrap();
        assert!(end.is_final);
        assert_eq!(
            end.payload.world_flags.set.get("cellar.cleared"),
            Some(&FlagValue::Bool(true))
        );
    }
}
