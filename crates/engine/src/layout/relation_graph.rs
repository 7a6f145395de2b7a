//! Relation graph layout
//!
//! Characters sit evenly spaced on a fixed circle, first character at twelve
//! o'clock, proceeding clockwise in collection order. Edges resolve their
//! endpoints by id at layout time; an edge whose endpoint character was
//! deleted is silently skipped by the graph while the list view degrades the
//! missing side to "Unknown".

use std::f64::consts::PI;

use worldloom_domain::{Character, CharacterId, Relation, World};

pub const GRAPH_RADIUS: f64 = 200.0;
pub const GRAPH_CENTER_X: f64 = 300.0;
pub const GRAPH_CENTER_Y: f64 = 250.0;

const UNKNOWN_NAME: &str = "Unknown";

/// A character placed on the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode<'a> {
    pub character: &'a Character,
    pub x: f64,
    pub y: f64,
}

/// A resolved edge with both endpoint positions and a label midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge<'a> {
    pub relation: &'a Relation,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub label_at: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationGraph<'a> {
    pub nodes: Vec<GraphNode<'a>>,
    pub edges: Vec<GraphEdge<'a>>,
}

/// One entry of the tabular relation list.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationRow<'a> {
    pub relation: &'a Relation,
    pub source_name: &'a str,
    pub target_name: &'a str,
}

fn node_position(index: usize, total: usize) -> (f64, f64) {
    let angle = index as f64 / total as f64 * 2.0 * PI - PI / 2.0;
    (
        GRAPH_CENTER_X + GRAPH_RADIUS * angle.cos(),
        GRAPH_CENTER_Y + GRAPH_RADIUS * angle.sin(),
    )
}

/// Lay out all characters and every fully-resolved relation.
pub fn layout(world: &World) -> RelationGraph<'_> {
    let total = world.characters.len();
    let nodes: Vec<GraphNode<'_>> = world
        .characters
        .iter()
        .enumerate()
        .map(|(index, character)| {
            let (x, y) = node_position(index, total);
            GraphNode { character, x, y }
        })
        .collect();

    let find = |id: CharacterId| nodes.iter().find(|n| n.character.id == id);
    let edges = world
        .relations
        .iter()
        .filter_map(|relation| {
            let from = find(relation.source_id)?;
            let to = find(relation.target_id)?;
            Some(GraphEdge {
                relation,
                from: (from.x, from.y),
                to: (to.x, to.y),
                label_at: ((from.x + to.x) / 2.0, (from.y + to.y) / 2.0),
            })
        })
        .collect();

    RelationGraph { nodes, edges }
}

/// List rows for every relation, dangling endpoints included.
pub fn relation_rows(world: &World) -> Vec<RelationRow<'_>> {
    let name_of = |id: CharacterId| {
        world
            .character(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_NAME)
    };
    world
        .relations
        .iter()
        .map(|relation| RelationRow {
            relation,
            source_name: name_of(relation.source_id),
            target_name: name_of(relation.target_id),
        })
        .collect()
}
