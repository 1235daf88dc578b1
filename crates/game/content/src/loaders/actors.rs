//! Actor catalog loader.
//!
//! Loads actor templates (players, NPCs and bosses alike) from a RON list.

use std::collections::HashSet;
use std::path::Path;

use vale_core::{ActorTemplate, Capabilities, TemplateCatalog};

use crate::loaders::{LoadResult, read_file};

/// Loader for actor catalogs from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load an actor catalog from a RON file.
    ///
    /// RON format: `Vec<ActorTemplate>`, keyed by each template's `id`.
    pub fn load(path: &Path) -> LoadResult<TemplateCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), templates = catalog.len(), "actor catalog loaded");
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<TemplateCatalog> {
        let templates: Vec<ActorTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                anyhow::bail!("Duplicate actor template '{}'", template.id);
            }
            validate(template)?;
        }

        Ok(templates.into_iter().collect())
    }
}

fn validate(template: &ActorTemplate) -> LoadResult<()> {
    if template.max_health == 0 {
        anyhow::bail!("Actor template '{}' has no health", template.id);
    }
    if let Some(entry) = template.loot.iter().find(|entry| entry.chance > 100) {
        anyhow::bail!(
            "Actor template '{}' drops {:?} with chance {} (must be 0..=100)",
            template.id,
            entry.item.kind,
            entry.chance
        );
    }
    let weather_bound = template
        .capabilities
        .contains(Capabilities::HOSTILE_TO_WEATHER);
    if template.affinity.is_some() && !weather_bound {
        tracing::warn!(
            template = %template.id,
            "weather affinity without HOSTILE_TO_WEATHER is never applied"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vale_core::{ActorBehaviour, StatusKind, TemplateOracle, Weather, WeaponKind};

    const WOLF: &str = r#"(
        id: "red_wolf",
        max_health: 25,
        intrinsic_weapon: (kind: Intrinsic, damage: 15, hit_rate: 80),
        capabilities: "TARGETABLE | CAN_ACT | ENEMY | SPAWNED | HOSTILE_TO_WEATHER",
        behaviours: [Attacking, Follow, Wander],
        bounty: 25,
        loot: [(item: (kind: HealingVial), chance: 10)],
        affinity: Some((weather: Sunny, status: Empowered(multiplier: 3))),
    )"#;

    fn roster(entries: &[&str]) -> String {
        format!("[{}]", entries.join(", "))
    }

    #[test]
    fn parses_templates_with_defaults() {
        let catalog = ActorLoader::parse(&roster(&[WOLF])).unwrap();
        let wolf = catalog.template("red_wolf").unwrap();

        assert_eq!(wolf.max_health, 25);
        assert_eq!(wolf.max_stamina, 0);
        assert_eq!(wolf.intrinsic_weapon.kind, WeaponKind::Intrinsic);
        assert!(wolf.capabilities.contains(Capabilities::HOSTILE_TO_WEATHER));
        assert_eq!(
            wolf.behaviours,
            vec![
                ActorBehaviour::Attacking,
                ActorBehaviour::Follow,
                ActorBehaviour::Wander
            ]
        );
        let affinity = wolf.affinity.unwrap();
        assert_eq!(affinity.weather, Weather::Sunny);
        assert_eq!(affinity.status, StatusKind::Empowered { multiplier: 3 });
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = ActorLoader::parse(&roster(&[WOLF, WOLF])).unwrap_err();
        assert!(error.to_string().contains("Duplicate actor template 'red_wolf'"));
    }

    #[test]
    fn loot_chance_above_certainty_is_rejected() {
        let broken = WOLF.replace("chance: 10", "chance: 150");
        assert!(ActorLoader::parse(&roster(&[&broken])).is_err());
    }
}
