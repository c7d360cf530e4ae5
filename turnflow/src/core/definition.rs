//! Flow definitions as plain data.
//!
//! A definition names callbacks by id and children by node id, so it can be
//! stored as TOML and paired with a registry at load time:
//!
//! ```toml
//! [[nodes]]
//! id = "round"
//! actions = ["announce-round"]
//! cleanups = ["end-round"]
//! children = ["turn"]
//!
//! [[nodes]]
//! id = "turn"
//! per_player = true
//! actions = ["take-turn"]
//! ```

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::core::builder::FlowBuilder;
use crate::core::ids::CallbackId;
use crate::core::node::{NodeConfig, NodeHandle};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowDefinition {
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeDefinition {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    /// Expand into one leaf per player, with ids `"{id}::{player_id}"`.
    pub per_player: bool,
    pub actions: Vec<String>,
    pub cleanups: Vec<String>,
    pub children: Vec<String>,
}

impl FlowDefinition {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parse flow definition")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize flow definition")
    }

    /// Declare every node on `builder`, children before parents, in file
    /// order. Returns the handles of each definition in file order (a
    /// per-player definition contributes one handle per player).
    pub fn declare<S, A>(&self, builder: &mut FlowBuilder<S, A>) -> Result<Vec<NodeHandle>> {
        let mut by_id = HashMap::new();
        for def in &self.nodes {
            if by_id.insert(def.id.as_str(), def).is_some() {
                bail!("duplicate node definition '{}'", def.id);
            }
            if def.per_player && def.player_id.is_some() {
                bail!("node '{}': per_player cannot be combined with player_id", def.id);
            }
            if def.per_player && !def.children.is_empty() {
                bail!("node '{}': per_player nodes cannot have children", def.id);
            }
        }

        let mut declarer = Declarer {
            by_id,
            declared: HashMap::new(),
            in_progress: HashSet::new(),
        };
        let mut handles = Vec::new();
        for def in &self.nodes {
            handles.extend(declarer.declare(def, builder)?);
        }
        Ok(handles)
    }
}

struct Declarer<'d> {
    by_id: HashMap<&'d str, &'d NodeDefinition>,
    declared: HashMap<&'d str, Vec<NodeHandle>>,
    in_progress: HashSet<&'d str>,
}

impl<'d> Declarer<'d> {
    fn declare<S, A>(
        &mut self,
        def: &'d NodeDefinition,
        builder: &mut FlowBuilder<S, A>,
    ) -> Result<Vec<NodeHandle>> {
        if let Some(handles) = self.declared.get(def.id.as_str()) {
            return Ok(handles.clone());
        }
        if !self.in_progress.insert(def.id.as_str()) {
            bail!("cycle detected at node '{}'", def.id);
        }

        let mut children = Vec::new();
        for child_id in &def.children {
            let child = *self
                .by_id
                .get(child_id.as_str())
                .ok_or_else(|| anyhow!("node '{}': unknown child '{}'", def.id, child_id))?;
            children.extend(self.declare(child, builder)?);
        }

        let handles = if def.per_player {
            let configs: Vec<NodeConfig> = builder
                .players()
                .iter()
                .map(|player| config_for(def, format!("{}::{}", def.id, player.id), Some(&player.id)))
                .collect();
            configs
                .into_iter()
                .map(|config| builder.leaf(config))
                .collect()
        } else {
            let config = config_for(def, def.id.clone(), def.player_id.as_ref());
            vec![builder.node(config, children)]
        };

        self.in_progress.remove(def.id.as_str());
        self.declared.insert(def.id.as_str(), handles.clone());
        Ok(handles)
    }
}

fn config_for(def: &NodeDefinition, id: String, player_id: Option<&String>) -> NodeConfig {
    NodeConfig {
        id: Some(id),
        player_id: player_id.cloned(),
        actions: def.actions.iter().map(|name| CallbackId::named(name.as_str())).collect(),
        cleanups: def.cleanups.iter().map(|name| CallbackId::named(name.as_str())).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::Player;

    const TURNS: &str = r#"
[[nodes]]
id = "round"
actions = ["announce"]
cleanups = ["end-round"]
children = ["turn"]

[[nodes]]
id = "turn"
per_player = true
actions = ["take-turn"]

[[nodes]]
id = "epilogue"
"#;

    #[test]
    fn declares_children_first_and_expands_per_player() {
        let definition = FlowDefinition::from_toml(TURNS).expect("parse");
        let players = vec![Player::new("x", ()), Player::new("o", ())];
        let mut builder: FlowBuilder<()> = FlowBuilder::with_players(players);
        definition.declare(&mut builder).expect("declare");
        let flow = builder.build().expect("build");

        let roots: Vec<&str> = flow.roots().map(|node| node.id.as_str()).collect();
        assert_eq!(roots, vec!["round", "epilogue"]);

        let round = flow.find("round").expect("round");
        let children: Vec<&str> = round
            .children
            .iter()
            .filter_map(|handle| flow.node(*handle))
            .map(|node| node.id.as_str())
            .collect();
        assert_eq!(children, vec!["turn::x", "turn::o"]);
        assert_eq!(
            flow.find("turn::o").and_then(|node| node.player_id.as_deref()),
            Some("o")
        );
    }

    #[test]
    fn rejects_unknown_children_and_cycles() {
        let unknown = FlowDefinition::from_toml(
            r#"
[[nodes]]
id = "round"
children = ["ghost"]
"#,
        )
        .expect("parse");
        let mut builder: FlowBuilder<()> = FlowBuilder::new();
        let err = unknown.declare(&mut builder).expect_err("unknown child");
        assert!(err.to_string().contains("unknown child 'ghost'"));

        let cyclic = FlowDefinition::from_toml(
            r#"
[[nodes]]
id = "a"
children = ["b"]

[[nodes]]
id = "b"
children = ["a"]
"#,
        )
        .expect("parse");
        let mut builder: FlowBuilder<()> = FlowBuilder::new();
        let err = cyclic.declare(&mut builder).expect_err("cycle");
        assert!(err.to_string().contains("cycle detected"));
    }

    #[test]
    fn rejects_per_player_with_children() {
        let definition = FlowDefinition::from_toml(
            r#"
[[nodes]]
id = "leaf"

[[nodes]]
id = "turn"
per_player = true
children = ["leaf"]
"#,
        )
        .expect("parse");
        let mut builder: FlowBuilder<()> = FlowBuilder::new();
        let err = definition.declare(&mut builder).expect_err("per_player children");
        assert!(err.to_string().contains("cannot have children"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = FlowDefinition::from_toml(
            r#"
[[nodes]]
id = "round"
onStart = "x"
"#,
        )
        .expect_err("unknown field");
        assert!(format!("{err:#}").contains("onStart"));
    }
}
