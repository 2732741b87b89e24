use crate::Kinetics::components::{Component, ComponentCatalog};
use crate::Kinetics::errors::KineticsResult;
use crate::Kinetics::kinetic_laws::{KineticLaw, KineticParameters, PhotocatalyticStruct, RateLaw};
use crate::Kinetics::reaction_builder::{ReactionBuilder, ReactionRow, validate_against_catalog};
use crate::Kinetics::reaction_registry::ReactionRegistry;
use crate::Kinetics::reactor_setup::ReactorSetup;
use crate::settings::KineticsConfig;
use log::{error, info};

pub fn kin_examples(kintask: usize, config: &KineticsConfig) {
    let result = match kintask {
        0 => power_law_example(config),
        1 => photocatalytic_example(config),
        2 => molar_mass_example(),
        _ => {
            error!("no example with number {}", kintask);
            Ok(())
        }
    };
    if let Err(e) = result {
        error!("example {} failed: {}", kintask, e);
    }
}

/// building reactions row by row and keeping them in the registry
fn power_law_example(config: &KineticsConfig) -> KineticsResult<()> {
    let mut catalog = ComponentCatalog::new();
    for (id, name) in [("A", "ethyl acetate"), ("B", "hydroxide"), ("C", "acetate"), ("D", "ethanol")] {
        catalog.add(Component::new(id, name, None))?;
    }

    let mut builder = ReactionBuilder::with_config(config.default_law, config.clone());
    builder.set_law(KineticLaw::PowerLaw);
    builder
        .push_row(ReactionRow::reagent("A", 1.0).with_exponent(1.0))
        .push_row(ReactionRow::reagent("B", 1.0).with_exponent(1.0))
        .push_row(ReactionRow::product("C", 1.0))
        .push_row(ReactionRow::product("D", 1.0));
    validate_against_catalog(&builder.rows, &catalog)?;
    println!("reaction: {}", builder.reaction_str());
    if let Some(latex) = builder.rate_latex() {
        println!("rate: {}", latex);
    }
    // k left empty: to be found from experimental data
    let reaction = builder.finalize()?;
    println!("constants to fit: {:?}", reaction.parameters.unknown_parameters());

    let mut registry = ReactionRegistry::new();
    registry.add(reaction);
    builder
        .push_row(ReactionRow::reagent("C", 1.0))
        .push_row(ReactionRow::product("D", 1.0));
    builder.set_parameters(KineticParameters::power_law(Some(1e-3)));
    registry.add(builder.finalize()?);
    registry.set_active(0, false)?;
    registry.pretty_print();

    let (substances, matrix) = registry.stoichiometric_matrix(false);
    println!("substances: {:?}", substances);
    println!("stoichiometric matrix {}", matrix);
    info!("{} of {} reactions active", registry.active_reactions().count(), registry.len());
    Ok(())
}

/// photocatalytic degradation of methylene blue
fn photocatalytic_example(config: &KineticsConfig) -> KineticsResult<()> {
    let mut catalog = ComponentCatalog::new();
    catalog.add(Component::new("MB", "methylene blue", Some(319.85)))?;
    catalog.add(Component::new("P", "degradation products", None))?;

    let mut builder = ReactionBuilder::with_config(KineticLaw::Photocatalytic, config.clone());
    builder
        .push_row(ReactionRow::reagent("MB", 1.0))
        .push_row(ReactionRow::product("P", 1.0));
    builder.set_parameters(KineticParameters::Photocatalytic(PhotocatalyticStruct {
        phi: Some(0.02),
        Ep0: Some(1e-5),
        epsilon: Some(7.4e4),
        Abs: Some(1.2),
        l: Some(1.0),
        l_reactor: Some(3.0),
    }));
    let reaction = builder.finalize()?;
    if let Some(latex) = reaction.rate_latex() {
        println!("rate: {}", latex);
    }

    let mut reactor = ReactorSetup::from_catalog(&catalog);
    reactor.set_initial_concentration("MB", 1e-5)?;
    reactor.set_volume(0.1)?;
    reactor.set_light_intensity(100.0)?;
    let conc = reactor.initial_concentrations();
    println!("initial rate: {:e} mol/(L*s)", reaction.rate(&conc)?);

    let mut registry = ReactionRegistry::new();
    registry.add(reaction);
    let rates = registry.net_production_rates(&conc)?;
    println!("net production rates: {:?}", rates);
    println!("{}", registry.to_json()?);
    Ok(())
}

fn molar_mass_example() -> KineticsResult<()> {
    let mut catalog = ComponentCatalog::new();
    catalog.add(Component::new("MB", "methylene blue", None).with_formula("C16H18ClN3S"))?;
    catalog.add(Component::new("W", "water", None).with_formula("H2O"))?;
    for id in catalog.ids() {
        println!("{}: {:.3} g/mol", id, catalog.molar_mass(id)?);
    }
    let empty = KineticParameters::empty(KineticLaw::Photocatalytic);
    println!("photocatalytic constants: {:?}", empty.unknown_parameters());
    Ok(())
}
