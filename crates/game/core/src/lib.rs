//! Deterministic rules for a grid-based, turn-driven role-playing world.
//!
//! `vale-core` owns the decision and resolution pipeline: behaviours propose
//! [`Action`]s, the [`GameEngine`] validates and applies them against the
//! [`GameState`], and spawnable grounds and the weather controller run once
//! per tick around the actors' turns. Map layout, templates, randomness and
//! tunables come in through the read-only oracles in [`env`].
//!
//! Nothing here performs I/O. Every tick reports what happened as structured
//! [`GameEvent`]s; rendering them is left to the caller.
pub mod action;
pub mod behaviour;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod focus;
pub mod scenario;
pub mod spawn;
pub mod state;
pub mod weather;

pub use action::{
    Action, ActionError, ActionKind, ActionOutcome, ActionTransition, AttackAction,
    ConsumeAction, ConsumeSource, DoNothingAction, DropAction, Effect, FocusAction,
    GreatSlamAction, MoveAction, MoveMapAction, StabAndStepAction, UnlockDoorAction,
    UpgradeAction, UpgradeTarget,
};
pub use behaviour::{ActorBehaviour, ProposalContext};
pub use config::GameConfig;
pub use engine::{ActionProvider, GameEngine, IdleInput, ScriptedInput};
pub use env::{
    ActorTemplate, Env, GameEnv, GridAtlas, GridMap, MapDimensions, MapOracle, OracleError,
    PcgRng, RngOracle, TemplateCatalog, TemplateOracle, TerrainKind,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{DefeatCause, GameEvent, ResetSummary, SpawnSkip, TickReport};
pub use scenario::{GroundSpec, Placement, Scenario, ScenarioError, WeatherSetup};
pub use spawn::{GroundKind, SpawnEntry, SpawnableGround};
pub use state::{
    ActorState, Attribute, AttributeLedger, Capabilities, Direction, EntityId, GameState, Item,
    ItemKind, Location, MapId, Position, StateError, Status, StatusKind, StatusName, Tick,
    Weapon, WeaponKind,
};
pub use weather::{Weather, WeatherAffinity, WeatherController};
