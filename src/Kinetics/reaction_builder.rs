use crate::Kinetics::components::ComponentCatalog;
use crate::Kinetics::errors::{KineticsError, KineticsResult};
use crate::Kinetics::kinetic_laws::{KineticLaw, KineticParameters, RateLaw};
use crate::Kinetics::species_map::{Exponents, Stoichiometry};
use crate::settings::{KineticsConfig, ZeroCoefficientPolicy};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// side of the reaction a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Reagent,
    Product,
}

/// one row of the reaction input table. Required fields are Options
/// because the user may leave any cell empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionRow {
    pub component_id: Option<String>,
    pub role: Option<Role>,
    /// stoichiometric coefficient, always entered as a non-negative number
    pub coefficient: Option<f64>,
    pub exponent: Option<f64>,
}

impl ReactionRow {
    pub fn new(component_id: &str, role: Role, coefficient: f64, exponent: Option<f64>) -> Self {
        Self {
            component_id: Some(component_id.to_string()),
            role: Some(role),
            coefficient: Some(coefficient),
            exponent,
        }
    }

    pub fn reagent(component_id: &str, coefficient: f64) -> Self {
        Self::new(component_id, Role::Reagent, coefficient, None)
    }

    pub fn product(component_id: &str, coefficient: f64) -> Self {
        Self::new(component_id, Role::Product, coefficient, None)
    }

    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = Some(exponent);
        self
    }
}

/// signed stoichiometric coefficients: -c for reagents, +c for products.
/// First row of a component wins, rows without coefficient are skipped
pub fn build_stoichiometry(rows: &[ReactionRow]) -> Stoichiometry {
    let mut stoichiometry = Stoichiometry::new();
    for row in rows {
        let (Some(id), Some(role), Some(c)) = (&row.component_id, row.role, row.coefficient) else {
            continue;
        };
        if stoichiometry.contains_key(id) {
            continue;
        }
        let signed = match role {
            Role::Reagent => -c,
            Role::Product => c,
        };
        stoichiometry.insert_first(id, signed);
    }
    stoichiometry
}

/// exponents of concentrations, first row of a component wins
pub fn build_exponents(rows: &[ReactionRow]) -> Exponents {
    let mut exponents = Exponents::new();
    for row in rows {
        if let Some(id) = &row.component_id {
            exponents.insert_first(id, row.exponent);
        }
    }
    exponents
}

/// "1 A+1 B → 2 C". Zero coefficients are not shown
pub fn format_reaction(stoichiometry: &Stoichiometry) -> String {
    let reagents: Vec<String> = stoichiometry
        .reagents()
        .map(|(id, c)| format!("{} {}", -c, id))
        .collect();
    let products: Vec<String> = stoichiometry
        .products()
        .map(|(id, c)| format!("{} {}", c, id))
        .collect();
    format!("{} → {}", reagents.join("+"), products.join("+"))
}

/// component ids that occur in more than one row (all rows after the first are ignored)
pub fn duplicate_components(rows: &[ReactionRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for id in rows.iter().filter_map(|r| r.component_id.as_ref()) {
        if !seen.insert(id.as_str()) && !duplicates.contains(id) {
            duplicates.push(id.clone());
        }
    }
    duplicates
}

/// checks rows before a reaction is committed, with default settings
pub fn validate_for_commit(
    rows: &[ReactionRow],
    law: KineticLaw,
    parameters: &KineticParameters,
) -> KineticsResult<()> {
    validate_for_commit_with(rows, law, parameters, &KineticsConfig::default())
}

pub fn validate_for_commit_with(
    rows: &[ReactionRow],
    law: KineticLaw,
    parameters: &KineticParameters,
    config: &KineticsConfig,
) -> KineticsResult<()> {
    if rows.is_empty() && config.reject_empty_reactions {
        return Err(KineticsError::IncompleteReaction(
            "reaction has no components".to_string(),
        ));
    }
    if parameters.law() != law {
        return Err(KineticsError::IncompleteReaction(format!(
            "parameters of {} kinetics given for {} kinetics",
            parameters.law(),
            law
        )));
    }
    let mut reagents: Vec<&str> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let Some(id) = row.component_id.as_deref() else {
            return Err(KineticsError::IncompleteReaction(format!(
                "row {} has no component",
                i
            )));
        };
        let Some(role) = row.role else {
            return Err(KineticsError::IncompleteReaction(format!(
                "row {} ({}) is neither reagent nor product",
                i, id
            )));
        };
        let Some(c) = row.coefficient else {
            return Err(KineticsError::IncompleteReaction(format!(
                "row {} ({}) has no stoichiometric coefficient",
                i, id
            )));
        };
        if !c.is_finite() || c < 0.0 {
            return Err(KineticsError::IncompleteReaction(format!(
                "row {} ({}) has invalid coefficient {}",
                i, id, c
            )));
        }
        if c == 0.0 && config.zero_coefficients == ZeroCoefficientPolicy::Reject {
            return Err(KineticsError::IncompleteReaction(format!(
                "row {} ({}) has zero coefficient",
                i, id
            )));
        }
        if role == Role::Reagent && !reagents.contains(&id) {
            reagents.push(id);
        }
    }
    if law == KineticLaw::Photocatalytic && reagents.len() > 1 {
        return Err(KineticsError::IncompleteReaction(format!(
            "photocatalytic kinetics allows only one reagent, got {}",
            reagents.join(", ")
        )));
    }
    if config.warn_on_duplicate_rows {
        for id in duplicate_components(rows) {
            warn!("component {} entered more than once, only the first row is used", id);
        }
    }
    Ok(())
}

/// every component named in rows must be in the catalog
pub fn validate_against_catalog(rows: &[ReactionRow], catalog: &ComponentCatalog) -> KineticsResult<()> {
    for id in rows.iter().filter_map(|r| r.component_id.as_deref()) {
        if !catalog.contains(id) {
            return Err(KineticsError::UnknownComponent(id.to_string()));
        }
    }
    Ok(())
}

/// finalized reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub stoichiometry: Stoichiometry,
    pub exponents: Exponents,
    pub parameters: KineticParameters,
    pub active: bool,
    pub reaction_str: String,
}

impl Reaction {
    /// reaction from already validated rows
    pub fn from_rows(rows: &[ReactionRow], parameters: KineticParameters) -> Self {
        let stoichiometry = build_stoichiometry(rows);
        let exponents = build_exponents(rows);
        let reaction_str = format_reaction(&stoichiometry);
        Self {
            stoichiometry,
            exponents,
            parameters,
            active: true,
            reaction_str,
        }
    }

    pub fn law(&self) -> KineticLaw {
        self.parameters.law()
    }

    pub fn rate_latex(&self) -> Option<String> {
        self.parameters.rate_latex(&self.stoichiometry, &self.exponents)
    }

    pub fn rate(&self, concentrations: &HashMap<String, f64>) -> KineticsResult<f64> {
        self.parameters
            .rate(&self.stoichiometry, &self.exponents, concentrations)
    }

    pub fn rate_expr(&self) -> KineticsResult<Expr> {
        self.parameters.rate_expr(&self.stoichiometry, &self.exponents)
    }
}

/// collects rows and kinetic constants of one reaction until it is committed
#[derive(Debug, Clone)]
pub struct ReactionBuilder {
    pub rows: Vec<ReactionRow>,
    pub parameters: KineticParameters,
    config: KineticsConfig,
}

impl ReactionBuilder {
    pub fn new(law: KineticLaw) -> Self {
        Self::with_config(law, KineticsConfig::default())
    }

    pub fn with_config(law: KineticLaw, config: KineticsConfig) -> Self {
        Self {
            rows: Vec::new(),
            parameters: KineticParameters::empty(law),
            config,
        }
    }

    pub fn push_row(&mut self, row: ReactionRow) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// choosing another law drops the constants entered for the previous one
    pub fn set_law(&mut self, law: KineticLaw) {
        if self.parameters.law() != law {
            self.parameters = KineticParameters::empty(law);
        }
    }

    pub fn set_parameters(&mut self, parameters: KineticParameters) {
        self.parameters = parameters;
    }

    pub fn law(&self) -> KineticLaw {
        self.parameters.law()
    }

    pub fn stoichiometry(&self) -> Stoichiometry {
        build_stoichiometry(&self.rows)
    }

    pub fn exponents(&self) -> Exponents {
        build_exponents(&self.rows)
    }

    pub fn reaction_str(&self) -> String {
        format_reaction(&self.stoichiometry())
    }

    /// rate equation preview for the rows entered so far
    pub fn rate_latex(&self) -> Option<String> {
        self.parameters
            .rate_latex(&self.stoichiometry(), &self.exponents())
    }

    pub fn validate(&self) -> KineticsResult<()> {
        validate_for_commit_with(&self.rows, self.law(), &self.parameters, &self.config)
    }

    /// validates and builds the reaction, then empties the input as the form does after commit.
    /// On error nothing is changed
    pub fn finalize(&mut self) -> KineticsResult<Reaction> {
        self.validate()?;
        let reaction = Reaction::from_rows(&self.rows, self.parameters.clone());
        info!(
            "reaction {} with {} kinetics finalized",
            reaction.reaction_str,
            reaction.law()
        );
        self.clear();
        Ok(reaction)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.parameters = KineticParameters::empty(self.parameters.law());
    }
}
