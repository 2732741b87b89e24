use crate::Kinetics::components::ComponentCatalog;
use crate::Kinetics::errors::{KineticsError, KineticsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// reactor data entered below the reaction list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactorSetup {
    /// (component_id, initial concentration in mol/L)
    pub initial_conc: Vec<(String, Option<f64>)>,
    /// L
    pub volume: Option<f64>,
    /// cd
    pub light_intensity: Option<f64>,
}

fn positive(value: f64, what: &str) -> KineticsResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(KineticsError::InvalidValue(format!(
            "{} must be positive, got {}",
            what, value
        )))
    }
}

impl ReactorSetup {
    /// one empty concentration cell per component of the catalog
    pub fn from_catalog(catalog: &ComponentCatalog) -> Self {
        Self {
            initial_conc: catalog.iter().map(|c| (c.id.clone(), None)).collect(),
            volume: None,
            light_intensity: None,
        }
    }

    pub fn set_initial_concentration(&mut self, id: &str, value: f64) -> KineticsResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(KineticsError::InvalidValue(format!(
                "initial concentration of {} must be non-negative, got {}",
                id, value
            )));
        }
        match self.initial_conc.iter_mut().find(|(c, _)| c == id) {
            Some((_, conc)) => {
                *conc = Some(value);
                Ok(())
            }
            None => Err(KineticsError::UnknownComponent(id.to_string())),
        }
    }

    pub fn set_volume(&mut self, volume: f64) -> KineticsResult<()> {
        self.volume = Some(positive(volume, "reactor volume")?);
        Ok(())
    }

    pub fn set_light_intensity(&mut self, intensity: f64) -> KineticsResult<()> {
        self.light_intensity = Some(positive(intensity, "light intensity")?);
        Ok(())
    }

    /// filled concentration cells only
    pub fn initial_concentrations(&self) -> HashMap<String, f64> {
        self.initial_conc
            .iter()
            .filter_map(|(id, c)| c.map(|c| (id.clone(), c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::components::Component;

    fn setup() -> ReactorSetup {
        let mut catalog = ComponentCatalog::new();
        catalog.add(Component::new("MB", "methylene blue", None)).unwrap();
        catalog.add(Component::new("P", "product", None)).unwrap();
        ReactorSetup::from_catalog(&catalog)
    }

    #[test]
    fn test_from_catalog_has_empty_cells() {
        let setup = setup();
        assert_eq!(setup.initial_conc.len(), 2);
        assert!(setup.initial_concentrations().is_empty());
        assert_eq!(setup.volume, None);
    }

    #[test]
    fn test_set_values() {
        let mut setup = setup();
        setup.set_initial_concentration("MB", 1e-4).unwrap();
        setup.set_volume(0.25).unwrap();
        setup.set_light_intensity(120.0).unwrap();
        let conc = setup.initial_concentrations();
        assert_eq!(conc.len(), 1);
        assert_eq!(conc["MB"], 1e-4);
        assert_eq!(setup.volume, Some(0.25));
    }

    #[test]
    fn test_invalid_values() {
        let mut setup = setup();
        assert!(matches!(
            setup.set_initial_concentration("X", 1.0),
            Err(KineticsError::UnknownComponent(_))
        ));
        assert!(setup.set_initial_concentration("MB", -1.0).is_err());
        assert!(setup.set_volume(0.0).is_err());
        assert!(setup.set_light_intensity(f64::INFINITY).is_err());
        assert!(setup.initial_concentrations().is_empty());
        assert_eq!(setup.volume, None);
        assert_eq!(setup.light_intensity, None);
    }
}
