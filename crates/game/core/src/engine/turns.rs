use super::{ActionProvider, GameEngine};
use crate::env::{GameEnv, RollContext, compute_seed};
use crate::events::{DefeatCause, GameEvent, TickReport};
use crate::spawn;
use crate::state::{
    ActorState, Attribute, Capabilities, EntityId, Item, StatusEffect, StatusEvent,
};
use crate::weather::{Weather, WeatherTransition};

impl<'a> GameEngine<'a> {
    /// Runs one world tick. `input` drives the player's turn.
    pub fn run_tick(&mut self, env: GameEnv<'_>, input: &mut dyn ActionProvider) -> TickReport {
        self.state.tick = self.state.tick.next();
        let mut report = TickReport::new(self.state.tick, self.state.weather.current());
        let span = tracing::debug_span!("tick", tick = %self.state.tick);
        let _guard = span.enter();

        if let Some(transition) = self.state.weather.advance() {
            self.on_weather_change(transition, &mut report.events);
        }

        for id in self.state.actor_ids() {
            let ready = self
                .state
                .actor(id)
                .is_some_and(|actor| actor.is_alive() && actor.has(Capabilities::CAN_ACT));
            if !ready {
                continue;
            }

            self.take_turn(env, id, input, &mut report);
            if report.player_defeated {
                break;
            }
        }

        if report.player_defeated {
            tracing::info!("player defeated, resetting every map");
            let summary = self.reset_maps(None);
            report.events.push(GameEvent::MapReset(summary));
        } else {
            report.events.extend(spawn::run(self.state, &env));
        }

        report.weather = self.state.weather.current();
        report
    }

    fn take_turn(
        &mut self,
        env: GameEnv<'_>,
        id: EntityId,
        input: &mut dyn ActionProvider,
        report: &mut TickReport,
    ) {
        if let Some(cause) = self.tick_statuses(id, &mut report.events) {
            self.defeat(env, id, cause, report);
            return;
        }
        self.acquire_follow_target(id);

        let is_player = self.state.actor(id).is_some_and(ActorState::is_player);
        let action = if is_player {
            self.regenerate(env, id);
            input.next_action(self.state, &env, id)
        } else {
            self.decide(env, id)
        };

        let outcome = self.execute_turn(env, id, &action);
        let by = outcome.actor;
        report.events.push(GameEvent::Action(outcome));
        self.resolve_defeats(env, by, report);
    }

    /// Advances `id`'s statuses. Returns a cause if they defeated it.
    fn tick_statuses(&mut self, id: EntityId, events: &mut Vec<GameEvent>) -> Option<DefeatCause> {
        let actor = self.state.actor_mut(id)?;
        let mut cause = None;
        for event in actor.ledger.tick() {
            match event {
                StatusEvent::Ticked { status, effect } => {
                    if let Some(StatusEffect::Damaged { defeated: true, .. }) = effect {
                        cause = Some(DefeatCause::Status(status));
                    }
                    events.push(GameEvent::StatusTicked {
                        actor: id,
                        status,
                        effect,
                    });
                }
                StatusEvent::Expired { status, terminal } => events.push(GameEvent::StatusExpired {
                    actor: id,
                    status,
                    terminal,
                }),
            }
        }
        cause
    }

    /// Starts tracking the first adjacent enemy when the current target is gone.
    fn acquire_follow_target(&mut self, id: EntityId) {
        let Some(actor) = self.state.actor(id) else {
            return;
        };
        if actor.is_player() {
            return;
        }
        let tracking = actor
            .follow_target
            .and_then(|target| self.state.actor(target))
            .is_some_and(ActorState::is_alive);
        if tracking {
            return;
        }

        let found = self
            .state
            .actors()
            .find(|other| actor.can_target(other) && actor.location.is_adjacent(other.location))
            .map(|other| other.id);
        let Some(target) = found else {
            return;
        };
        if let Some(actor) = self.state.actor_mut(id) {
            tracing::debug!(actor = %id, %target, "now following");
            actor.follow_target = Some(target);
        }
    }

    fn regenerate(&mut self, env: GameEnv<'_>, id: EntityId) {
        let percent = env
            .config()
            .map(|config| config.stamina_regen_percent)
            .unwrap_or_default();
        if let Some(actor) = self.state.actor_mut(id) {
            let amount = actor.ledger.stamina().percent_of_max(percent);
            actor.ledger.adjust(Attribute::Stamina, i64::from(amount));
        }
    }

    /// Collects everyone the last action brought down, plus the actor itself
    /// if it ended its move on lethal ground.
    fn resolve_defeats(&mut self, env: GameEnv<'_>, by: EntityId, report: &mut TickReport) {
        let mut fallen: Vec<(EntityId, DefeatCause)> = self
            .state
            .actors()
            .filter(|actor| !actor.is_alive())
            .map(|actor| (actor.id, DefeatCause::Action { by }))
            .collect();

        if self.on_lethal_ground(env, by) {
            if let Some(actor) = self.state.actor_mut(by) {
                actor.ledger.defeat();
            }
            fallen.push((by, DefeatCause::Terrain));
        }

        for (id, cause) in fallen {
            self.defeat(env, id, cause, report);
        }
    }

    fn on_lethal_ground(&self, env: GameEnv<'_>, id: EntityId) -> bool {
        let (Ok(map), Some(actor)) = (env.map(), self.state.actor(id)) else {
            return false;
        };
        actor.is_alive()
            && !actor.has(Capabilities::VOID_IMMUNE)
            && self
                .state
                .tile_view(map, actor.location)
                .is_some_and(|view| view.is_lethal())
    }

    /// Removes a fallen actor and drops what it carried.
    fn defeat(&mut self, env: GameEnv<'_>, id: EntityId, cause: DefeatCause, report: &mut TickReport) {
        let Some(actor) = self.state.remove_actor(id) else {
            return;
        };
        tracing::info!(actor = %id, template = %actor.template, at = %actor.location, ?cause, "defeated");
        report.events.push(GameEvent::Defeated {
            actor: id,
            template: actor.template.clone(),
            at: actor.location,
            cause,
        });

        let drops = self.roll_drops(env, &actor);
        if !drops.is_empty() {
            self.state.world.drop_items(actor.location, drops.iter().copied());
            report.events.push(GameEvent::ItemsDropped {
                at: actor.location,
                items: drops,
            });
        }

        if actor.has(Capabilities::WEATHER_CONTROLLER) {
            tracing::info!(actor = %id, "weather controller fell, weather settles");
            if let Some(transition) = self.state.weather.settle(Weather::Clear) {
                self.on_weather_change(transition, &mut report.events);
            }
        }
        if actor.is_player() {
            report.player_defeated = true;
        }
    }

    fn roll_drops(&self, env: GameEnv<'_>, actor: &ActorState) -> Vec<Item> {
        let mut drops = Vec::new();
        if actor.bounty > 0 {
            drops.push(Item::runes(actor.bounty));
        }
        let Ok(rng) = env.rng() else {
            return drops;
        };
        for (index, entry) in actor.loot.iter().enumerate() {
            let seed = compute_seed(
                self.state.seed,
                self.state.nonce,
                actor.id.0,
                RollContext::Loot,
                index as u32,
            );
            if rng.chance(seed, entry.chance) {
                drops.push(entry.item);
            }
        }
        drops
    }

    /// Weather-bound statuses end, then affinities for the new weather apply.
    fn on_weather_change(&mut self, transition: WeatherTransition, events: &mut Vec<GameEvent>) {
        tracing::info!(from = %transition.from, to = %transition.to, "weather changed");
        events.push(GameEvent::WeatherChanged {
            from: transition.from,
            to: transition.to,
        });

        for actor in self.state.actors_mut() {
            for event in actor.ledger.expire_weather_bound() {
                if let StatusEvent::Expired { status, terminal } = event {
                    events.push(GameEvent::StatusExpired {
                        actor: actor.id,
                        status,
                        terminal,
                    });
                }
            }
            if let Some(status) = actor.weather_status(transition.to) {
                actor.ledger.apply_status(status);
            }
        }
    }
}
