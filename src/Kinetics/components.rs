use crate::Kinetics::errors::{KineticsError, KineticsResult};
use crate::Kinetics::molmass::calculate_molar_mass;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// chemical component (substance) the user can refer to in reaction rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    /// g/mol
    pub molar_mass: Option<f64>,
    /// chemical formula, used for molar mass when molar_mass is not set
    pub formula: Option<String>,
}

impl Component {
    pub fn new(id: &str, name: &str, molar_mass: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            molar_mass,
            formula: None,
        }
    }

    pub fn with_formula(mut self, formula: &str) -> Self {
        self.formula = Some(formula.to_string());
        self
    }

    fn check(&self) -> KineticsResult<()> {
        if self.id.trim().is_empty() {
            return Err(KineticsError::InvalidComponent(
                "component id must not be blank".to_string(),
            ));
        }
        if let Some(m) = self.molar_mass {
            if !(m.is_finite() && m > 0.0) {
                return Err(KineticsError::InvalidComponent(format!(
                    "molar mass of {} must be positive, got {}",
                    self.id, m
                )));
            }
        }
        Ok(())
    }
}

/// ordered table of components with unique ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentCatalog {
    components: Vec<Component>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, component: Component) -> KineticsResult<()> {
        component.check()?;
        if self.contains(&component.id) {
            return Err(KineticsError::DuplicateComponent(component.id));
        }
        info!("component {} added to catalog", component.id);
        self.components.push(component);
        Ok(())
    }

    /// replaces the component with the same id
    pub fn update(&mut self, component: Component) -> KineticsResult<()> {
        component.check()?;
        match self.components.iter_mut().find(|c| c.id == component.id) {
            Some(existing) => {
                *existing = component;
                Ok(())
            }
            None => Err(KineticsError::UnknownComponent(component.id)),
        }
    }

    pub fn remove(&mut self, id: &str) -> KineticsResult<Component> {
        match self.components.iter().position(|c| c.id == id) {
            Some(i) => Ok(self.components.remove(i)),
            None => Err(KineticsError::UnknownComponent(id.to_string())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// stored molar mass, otherwise the one calculated from the formula
    pub fn molar_mass(&self, id: &str) -> KineticsResult<f64> {
        let component = self
            .get(id)
            .ok_or_else(|| KineticsError::UnknownComponent(id.to_string()))?;
        if let Some(m) = component.molar_mass {
            return Ok(m);
        }
        match &component.formula {
            Some(formula) => {
                let (m, _) = calculate_molar_mass(formula)?;
                Ok(m)
            }
            None => {
                warn!("component {} has neither molar mass nor formula", id);
                Err(KineticsError::MissingMolarMass(id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn catalog() -> ComponentCatalog {
        let mut catalog = ComponentCatalog::new();
        catalog
            .add(Component::new("MB", "methylene blue", Some(319.85)))
            .unwrap();
        catalog
            .add(Component::new("W", "water", None).with_formula("H2O"))
            .unwrap();
        catalog.add(Component::new("X", "unknown", None)).unwrap();
        catalog
    }

    #[test]
    fn test_add_and_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("MB"));
        assert!(!catalog.contains("mb"));
        assert_eq!(catalog.ids(), vec!["MB", "W", "X"]);
        assert_eq!(catalog.get("W").unwrap().name, "water");
    }

    #[test]
    fn test_duplicate_and_invalid_components() {
        let mut catalog = catalog();
        let res = catalog.add(Component::new("MB", "again", None));
        assert!(matches!(res, Err(KineticsError::DuplicateComponent(id)) if id == "MB"));
        let res = catalog.add(Component::new("  ", "blank", None));
        assert!(matches!(res, Err(KineticsError::InvalidComponent(_))));
        let res = catalog.add(Component::new("Y", "negative mass", Some(-1.0)));
        assert!(matches!(res, Err(KineticsError::InvalidComponent(_))));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_update_and_remove() {
        let mut catalog = catalog();
        catalog
            .update(Component::new("X", "renamed", Some(10.0)))
            .unwrap();
        assert_eq!(catalog.get("X").unwrap().name, "renamed");
        assert!(matches!(
            catalog.update(Component::new("Q", "none", None)),
            Err(KineticsError::UnknownComponent(_))
        ));
        let removed = catalog.remove("MB").unwrap();
        assert_eq!(removed.id, "MB");
        assert_eq!(catalog.ids(), vec!["W", "X"]);
        assert!(catalog.remove("MB").is_err());
    }

    #[test]
    fn test_molar_mass_sources() {
        let catalog = catalog();
        assert_relative_eq!(catalog.molar_mass("MB").unwrap(), 319.85);
        assert_relative_eq!(catalog.molar_mass("W").unwrap(), 18.015, epsilon = 1e-9);
        assert!(matches!(
            catalog.molar_mass("X"),
            Err(KineticsError::MissingMolarMass(_))
        ));
        assert!(matches!(
            catalog.molar_mass("nope"),
            Err(KineticsError::UnknownComponent(_))
        ));
    }
}
