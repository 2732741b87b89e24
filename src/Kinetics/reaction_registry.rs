use crate::Kinetics::errors::{KineticsError, KineticsResult};
use crate::Kinetics::reaction_builder::Reaction;
use log::info;
use nalgebra::DMatrix;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// ordered collection of finalized reactions.
/// Every reaction is either active (takes part in further calculations) or not
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionRegistry {
    reactions: Vec<Reaction>,
}

impl ReactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// appends a reaction. The stored copy is always active, whatever flag the
    /// caller set; use `set_active` afterwards to switch it off.
    /// Deserialized registries keep their flags as saved
    pub fn add(&mut self, mut reaction: Reaction) {
        reaction.active = true;
        info!("reaction {} added to registry", reaction.reaction_str);
        self.reactions.push(reaction);
    }

    fn check_index(&self, index: usize) -> KineticsResult<()> {
        if index >= self.reactions.len() {
            return Err(KineticsError::IndexOutOfRange {
                index,
                len: self.reactions.len(),
            });
        }
        Ok(())
    }

    pub fn set_active(&mut self, index: usize, value: bool) -> KineticsResult<()> {
        self.check_index(index)?;
        self.reactions[index].active = value;
        Ok(())
    }

    /// removes reaction, later reactions move one position down
    pub fn remove(&mut self, index: usize) -> KineticsResult<Reaction> {
        self.check_index(index)?;
        let removed = self.reactions.remove(index);
        info!("reaction {} removed from registry", removed.reaction_str);
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Option<&Reaction> {
        self.reactions.get(index)
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn active_reactions(&self) -> impl Iterator<Item = &Reaction> + Clone {
        self.reactions.iter().filter(|r| r.active)
    }

    pub fn all(&self) -> impl Iterator<Item = &Reaction> + Clone {
        self.reactions.iter()
    }

    fn selected(&self, active_only: bool) -> Vec<&Reaction> {
        if active_only {
            self.active_reactions().collect()
        } else {
            self.all().collect()
        }
    }

    /// component ids in order of first appearance and the stoichiometric matrix:
    /// one row per reaction, one column per component
    pub fn stoichiometric_matrix(&self, active_only: bool) -> (Vec<String>, DMatrix<f64>) {
        let reactions = self.selected(active_only);
        let mut substances: Vec<String> = Vec::new();
        for reaction in reactions.iter() {
            for id in reaction.stoichiometry.keys() {
                if !substances.iter().any(|s| s == id) {
                    substances.push(id.to_string());
                }
            }
        }
        let mut matrix = DMatrix::zeros(reactions.len(), substances.len());
        for (i, reaction) in reactions.iter().enumerate() {
            for (j, id) in substances.iter().enumerate() {
                if let Some(nu) = reaction.stoichiometry.get(id) {
                    matrix[(i, j)] = *nu;
                }
            }
        }
        (substances, matrix)
    }

    /// sum over active reactions of nu_ij * r_j for every component, mol/(L*time)
    pub fn net_production_rates(
        &self,
        concentrations: &HashMap<String, f64>,
    ) -> KineticsResult<HashMap<String, f64>> {
        let mut rates: HashMap<String, f64> = HashMap::new();
        for reaction in self.active_reactions() {
            let r = reaction.rate(concentrations)?;
            for (id, nu) in reaction.stoichiometry.iter() {
                *rates.entry(id.to_string()).or_insert(0.0) += nu * r;
            }
        }
        Ok(rates)
    }

    /// table with the same columns the reaction list of the form has
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("#"),
            Cell::new("active"),
            Cell::new("reaction"),
            Cell::new("kinetics"),
        ]));
        for (i, reaction) in self.reactions.iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&i.to_string()),
                Cell::new(if reaction.active { "yes" } else { "no" }),
                Cell::new(&reaction.reaction_str),
                Cell::new(reaction.law().as_str()),
            ]));
        }
        table
    }

    pub fn pretty_print(&self) {
        self.to_table().printstd();
    }

    pub fn to_json(&self) -> KineticsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> KineticsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> KineticsResult<()> {
        let mut file = File::create(path.as_ref())?;
        file.write_all(self.to_json()?.as_bytes())?;
        info!("reactions have been written to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::kinetic_laws::KineticParameters;
    use crate::Kinetics::reaction_builder::ReactionRow;

    fn reaction(rows: &[ReactionRow], k: Option<f64>) -> Reaction {
        Reaction::from_rows(rows, KineticParameters::power_law(k))
    }

    #[test]
    fn test_add_remove_single() {
        let mut registry = ReactionRegistry::new();
        registry.add(reaction(&[ReactionRow::reagent("A", 1.0)], None));
        assert_eq!(registry.len(), 1);
        registry.remove(0).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.active_reactions().count(), 0);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut registry = ReactionRegistry::new();
        assert!(matches!(
            registry.remove(0),
            Err(KineticsError::IndexOutOfRange { index: 0, len: 0 })
        ));
        registry.add(reaction(&[ReactionRow::reagent("A", 1.0)], None));
        assert!(matches!(
            registry.set_active(1, false),
            Err(KineticsError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(registry.get(0).unwrap().active);
    }

    #[test]
    fn test_add_forces_active() {
        let mut registry = ReactionRegistry::new();
        let mut r = reaction(&[ReactionRow::reagent("A", 1.0)], None);
        r.active = false;
        registry.add(r);
        assert!(registry.get(0).unwrap().active);

        // inactive flags survive a JSON round trip
        registry.set_active(0, false).unwrap();
        let back = ReactionRegistry::from_json(&registry.to_json().unwrap()).unwrap();
        assert!(!back.get(0).unwrap().active);
        assert_eq!(back, registry);
    }

    #[test]
    fn test_stoichiometric_matrix() {
        let mut registry = ReactionRegistry::new();
        registry.add(reaction(
            &[ReactionRow::reagent("A", 1.0), ReactionRow::product("B", 2.0)],
            None,
        ));
        registry.add(reaction(
            &[ReactionRow::reagent("B", 1.0), ReactionRow::product("C", 1.0)],
            None,
        ));
        let (subs, m) = registry.stoichiometric_matrix(false);
        assert_eq!(subs, vec!["A", "B", "C"]);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m[(0, 0)], -1.0);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(0, 2)], 0.0);
        assert_eq!(m[(1, 1)], -1.0);
        assert_eq!(m[(1, 2)], 1.0);

        registry.set_active(0, false).unwrap();
        let (subs, m) = registry.stoichiometric_matrix(true);
        assert_eq!(subs, vec!["B", "C"]);
        assert_eq!(m.nrows(), 1);
    }

    #[test]
    fn test_table_has_row_per_reaction() {
        let mut registry = ReactionRegistry::new();
        registry.add(reaction(&[ReactionRow::reagent("A", 1.0)], None));
        registry.add(reaction(&[ReactionRow::product("B", 1.0)], None));
        let table = registry.to_table();
        assert_eq!(table.len(), 3);
        registry.pretty_print();
    }
}
