/// error type shared by all kinetics modules
pub mod errors;
/// insertion-ordered {component_id: value} map used for stoichiometric coefficients and exponents
pub mod species_map;
/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///  # Examples
/// ```
/// use KiForm::Kinetics::molmass::calculate_molar_mass;
/// let (molar_mass, element_composition) = calculate_molar_mass("C6H8O6").unwrap();
/// println!("Element counts: {:?}", element_composition);
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// ```
pub mod molmass;
/// table of components (id, name, molar mass) the reactions refer to
pub mod components;
/// Kinetic laws: power law r = k*ΠC_i^n_i and photocatalytic law for a single reagent.
/// Each law renders its rate equation as LaTeX, evaluates it numerically and
/// builds a symbolic expression of it
pub mod kinetic_laws;
/// The module takes as input the rows of the reaction table (component, reagent/product,
/// stoichiometric coefficient, exponent) and produces:
/// 1) the signed stoichiometry map {component: coefficient}, negative for reagents
/// 2) the map of exponents {component: exponent}
/// 3) the reaction string like "1 A+1 B → 2 C"
/// If a component is entered twice only the first row counts.
/// Rows are checked before the reaction is committed, so a failed commit changes nothing
///
/// # Examples
/// ```
/// use KiForm::Kinetics::kinetic_laws::{KineticLaw, KineticParameters};
/// use KiForm::Kinetics::reaction_builder::{ReactionBuilder, ReactionRow};
/// use KiForm::Kinetics::reaction_registry::ReactionRegistry;
/// let mut builder = ReactionBuilder::new(KineticLaw::PowerLaw);
/// builder
///     .push_row(ReactionRow::reagent("A", 2.0).with_exponent(2.0))
///     .push_row(ReactionRow::product("B", 1.0));
/// builder.set_parameters(KineticParameters::power_law(Some(0.1)));
/// let mut registry = ReactionRegistry::new();
/// registry.add(builder.finalize().unwrap());
/// assert_eq!(registry.get(0).unwrap().reaction_str, "2 A → 1 B");
/// ```
pub mod reaction_builder;
/// stored reactions with their active flags
pub mod reaction_registry;
/// initial concentrations, volume and light intensity of the reactor
pub mod reactor_setup;
