//! Experiment catalog: keys, routes and the navigation menu.

use crate::error::{AppError, AppResult};
use crate::handle::{Experiment, LabExperiment};
use pl_sim::{SeriesCapacity, Session};
use std::fmt;
use std::str::FromStr;

const ROUTE_ROOT: &str = "/mechanics";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExperimentGroup {
    Kinematics,
    Forces,
}

impl ExperimentGroup {
    pub fn key(self) -> &'static str {
        match self {
            ExperimentGroup::Kinematics => "kinematics",
            ExperimentGroup::Forces => "forces",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExperimentGroup::Kinematics => "Kinematics",
            ExperimentGroup::Forces => "Forces",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExperimentKind {
    UniformMotion,
    UniformAcceleration,
    FreeFall,
    Projectile,
    VectorDecomposition,
    ReferenceFrame,
    ForceTypes,
    ForceAnalysis,
    Equilibrium,
}

impl ExperimentKind {
    /// Menu order.
    pub const ALL: [ExperimentKind; 9] = [
        ExperimentKind::UniformMotion,
        ExperimentKind::UniformAcceleration,
        ExperimentKind::FreeFall,
        ExperimentKind::Projectile,
        ExperimentKind::VectorDecomposition,
        ExperimentKind::ReferenceFrame,
        ExperimentKind::ForceTypes,
        ExperimentKind::ForceAnalysis,
        ExperimentKind::Equilibrium,
    ];

    /// Route segment and CLI name.
    pub fn key(self) -> &'static str {
        match self {
            ExperimentKind::UniformMotion => "uniform-motion",
            ExperimentKind::UniformAcceleration => "uniform-acceleration",
            ExperimentKind::FreeFall => "free-fall",
            ExperimentKind::Projectile => "projectile",
            ExperimentKind::VectorDecomposition => "vector-decomposition",
            ExperimentKind::ReferenceFrame => "reference-frame",
            ExperimentKind::ForceTypes => "force-types",
            ExperimentKind::ForceAnalysis => "force-analysis",
            ExperimentKind::Equilibrium => "equilibrium",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExperimentKind::UniformMotion => "Uniform motion",
            ExperimentKind::UniformAcceleration => "Uniform acceleration",
            ExperimentKind::FreeFall => "Free fall",
            ExperimentKind::Projectile => "Projectile motion",
            ExperimentKind::VectorDecomposition => "Vector decomposition",
            ExperimentKind::ReferenceFrame => "Reference frames",
            ExperimentKind::ForceTypes => "Types of force",
            ExperimentKind::ForceAnalysis => "Force analysis",
            ExperimentKind::Equilibrium => "Equilibrium of forces",
        }
    }

    pub fn group(self) -> ExperimentGroup {
        match self {
            ExperimentKind::ForceTypes
            | ExperimentKind::ForceAnalysis
            | ExperimentKind::Equilibrium => ExperimentGroup::Forces,
            _ => ExperimentGroup::Kinematics,
        }
    }

    pub fn route(self) -> String {
        format!("{ROUTE_ROOT}/{}/{}", self.group().key(), self.key())
    }

    pub fn from_route(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|k| k.route() == path)
    }

    /// Default chart axes `(x, y)`.
    pub fn default_chart(self) -> (&'static str, &'static str) {
        match self {
            ExperimentKind::UniformMotion | ExperimentKind::UniformAcceleration => ("t", "x"),
            ExperimentKind::FreeFall => ("t", "y"),
            ExperimentKind::Projectile | ExperimentKind::VectorDecomposition => ("x", "y"),
            ExperimentKind::ReferenceFrame => ("t", "xRel"),
            ExperimentKind::ForceTypes => ("mass", "gravity"),
            ExperimentKind::ForceAnalysis => ("t", "v"),
            ExperimentKind::Equilibrium => ("t", "F"),
        }
    }

    /// A fresh session with the default model.
    pub fn open(self) -> Box<dyn Experiment> {
        self.open_with(SeriesCapacity::Unbounded)
    }

    /// Like [`open`](Self::open), keeping at most `capacity` samples.
    pub fn open_with(self, capacity: SeriesCapacity) -> Box<dyn Experiment> {
        use pl_forces::{Equilibrium, ForceAnalysis, ForceTypes};
        use pl_kinematics::{
            FreeFall, Projectile, ReferenceFrame, UniformAcceleration, UniformMotion,
            VectorDecomposition,
        };

        tracing::debug!(experiment = self.key(), ?capacity, "opening experiment");
        match self {
            ExperimentKind::UniformMotion => session::<UniformMotion>(capacity),
            ExperimentKind::UniformAcceleration => session::<UniformAcceleration>(capacity),
            ExperimentKind::FreeFall => session::<FreeFall>(capacity),
            ExperimentKind::Projectile => session::<Projectile>(capacity),
            ExperimentKind::VectorDecomposition => session::<VectorDecomposition>(capacity),
            ExperimentKind::ReferenceFrame => session::<ReferenceFrame>(capacity),
            ExperimentKind::ForceTypes => session::<ForceTypes>(capacity),
            ExperimentKind::ForceAnalysis => session::<ForceAnalysis>(capacity),
            ExperimentKind::Equilibrium => session::<Equilibrium>(capacity),
        }
    }
}

fn session<M: LabExperiment>(capacity: SeriesCapacity) -> Box<dyn Experiment> {
    Box::new(Session::<M>::with_capacity(capacity))
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts a key (`free-fall`) or a full route.
impl FromStr for ExperimentKind {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .or_else(|| Self::from_route(s))
            .ok_or_else(|| AppError::UnknownExperiment(s.to_string()))
    }
}

/// Navigation entry: a folder or a leaf with a route.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub label: String,
    pub route: Option<String>,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    fn folder(label: &str, children: Vec<MenuNode>) -> Self {
        Self {
            label: label.to_string(),
            route: None,
            children,
        }
    }

    /// Leaves below this node, depth first.
    pub fn leaves(&self) -> Vec<&MenuNode> {
        if self.children.is_empty() {
            return vec![self];
        }
        self.children.iter().flat_map(MenuNode::leaves).collect()
    }
}

/// Mechanics, then Kinematics / Forces.
pub fn menu_tree() -> Vec<MenuNode> {
    let groups = [ExperimentGroup::Kinematics, ExperimentGroup::Forces]
        .into_iter()
        .map(|group| {
            let leaves = ExperimentKind::ALL
                .into_iter()
                .filter(|k| k.group() == group)
                .map(|k| MenuNode {
                    label: k.name().to_string(),
                    route: Some(k.route()),
                    children: Vec::new(),
                })
                .collect();
            MenuNode::folder(group.name(), leaves)
        })
        .collect();
    vec![MenuNode::folder("Mechanics", groups)]
}
