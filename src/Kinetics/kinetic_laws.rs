//! Rate laws the user can attach to a reaction.
//!
//! Every constant of a law is optional: an empty constant means it is unknown and has to be
//! found later by regression of experimental data. Such constants enter symbolic rate
//! expressions as variables and make numeric evaluation fail with `MissingParameter`.
use crate::Kinetics::errors::{KineticsError, KineticsResult};
use crate::Kinetics::species_map::{Exponents, Stoichiometry};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// functional form of the reaction rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KineticLaw {
    PowerLaw,
    Photocatalytic,
}

impl KineticLaw {
    pub fn as_str(&self) -> &'static str {
        match self {
            KineticLaw::PowerLaw => "Powerlaw",
            KineticLaw::Photocatalytic => "Photocatalytic",
        }
    }
}

impl fmt::Display for KineticLaw {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KineticLaw {
    type Err = KineticsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "powerlaw" | "power_law" | "power law" => Ok(KineticLaw::PowerLaw),
            "photocatalytic" | "fotocatalítica" | "fotocatalitica" => {
                Ok(KineticLaw::Photocatalytic)
            }
            _ => Err(KineticsError::InvalidValue(format!(
                "unknown kinetic law: {}",
                s
            ))),
        }
    }
}

fn concentration_name(id: &str) -> String {
    format!("C_{}", id)
}

fn required(value: Option<f64>, name: &str) -> KineticsResult<f64> {
    value.ok_or_else(|| KineticsError::MissingParameter(name.to_string()))
}

fn concentration(concentrations: &HashMap<String, f64>, id: &str) -> KineticsResult<f64> {
    concentrations
        .get(id)
        .copied()
        .ok_or_else(|| KineticsError::MissingConcentration(id.to_string()))
}

/// known constant as a number, unknown one as a symbolic variable
fn const_or_var(value: Option<f64>, name: &str) -> Expr {
    match value {
        Some(v) => Expr::Const(v),
        None => Expr::Var(name.to_owned()),
    }
}

/// common interface of rate laws
#[enum_dispatch]
pub trait RateLaw {
    fn law(&self) -> KineticLaw;
    /// names of constants left empty by the user
    fn unknown_parameters(&self) -> Vec<&'static str>;
    /// LaTeX string of the rate equation, None if there is nothing to show
    fn rate_latex(&self, stoichiometry: &Stoichiometry, exponents: &Exponents) -> Option<String>;
    /// numeric rate for given concentrations {component_id: mol/L}
    fn rate(
        &self,
        stoichiometry: &Stoichiometry,
        exponents: &Exponents,
        concentrations: &HashMap<String, f64>,
    ) -> KineticsResult<f64>;
    /// symbolic rate; concentrations are variables named C_<component_id>
    fn rate_expr(&self, stoichiometry: &Stoichiometry, exponents: &Exponents) -> KineticsResult<Expr>;
}

///////////////////////////////POWER LAW////////////////////////////////////////
/// r = k * Π C_i^{n_i}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerLawStruct {
    pub k: Option<f64>,
}

impl PowerLawStruct {
    pub fn new(k: Option<f64>) -> Self {
        Self { k }
    }
}

/// components that enter the power law: exponent given and not zero
fn power_law_terms(exponents: &Exponents) -> impl Iterator<Item = (&str, f64)> {
    exponents.iter().filter_map(|(id, exp)| match exp {
        Some(e) if *e != 0.0 => Some((id, *e)),
        _ => None,
    })
}

impl RateLaw for PowerLawStruct {
    fn law(&self) -> KineticLaw {
        KineticLaw::PowerLaw
    }

    fn unknown_parameters(&self) -> Vec<&'static str> {
        if self.k.is_none() { vec!["k"] } else { vec![] }
    }

    fn rate_latex(&self, _stoichiometry: &Stoichiometry, exponents: &Exponents) -> Option<String> {
        let mut equation = String::from("k");
        for (id, exp) in power_law_terms(exponents) {
            equation.push_str(&format!("(C_{{{}}})^{{{}}}", id, exp));
        }
        if equation == "k" { None } else { Some(equation) }
    }

    fn rate(
        &self,
        _stoichiometry: &Stoichiometry,
        exponents: &Exponents,
        concentrations: &HashMap<String, f64>,
    ) -> KineticsResult<f64> {
        let mut r = required(self.k, "k")?;
        for (id, exp) in power_law_terms(exponents) {
            r *= concentration(concentrations, id)?.powf(exp);
        }
        Ok(r)
    }

    fn rate_expr(&self, _stoichiometry: &Stoichiometry, exponents: &Exponents) -> KineticsResult<Expr> {
        let k = const_or_var(self.k, "k");
        let expr = power_law_terms(exponents).fold(k, |acc, (id, exp)| {
            acc * Expr::Pow(
                Box::new(Expr::Var(concentration_name(id))),
                Box::new(Expr::Const(exp)),
            )
        });
        Ok(expr)
    }
}

///////////////////////////////PHOTOCATALYTIC///////////////////////////////////
/// r = phi * Ep0 * (epsilon * C * l / Abs) * (1 - 10^(-Abs/l * l_reactor))
/// phi - quantum yield, Ep0 - incident photon flux, epsilon - molar absorption coefficient,
/// Abs - absorbance over optical path l, l_reactor - optical path of the reactor.
/// Defined for a single reagent.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotocatalyticStruct {
    pub phi: Option<f64>,
    pub Ep0: Option<f64>,
    pub epsilon: Option<f64>,
    pub Abs: Option<f64>,
    pub l: Option<f64>,
    pub l_reactor: Option<f64>,
}

impl PhotocatalyticStruct {
    pub const PARAMETER_NAMES: [&'static str; 6] = ["phi", "Ep0", "epsilon", "Abs", "l", "l_reactor"];

    fn values(&self) -> [Option<f64>; 6] {
        [self.phi, self.Ep0, self.epsilon, self.Abs, self.l, self.l_reactor]
    }

    /// the single reagent of the reaction
    fn reagent<'a>(&self, stoichiometry: &'a Stoichiometry) -> KineticsResult<&'a str> {
        let reagents: Vec<&str> = stoichiometry.reagents().map(|(id, _)| id).collect();
        match reagents.as_slice() {
            [single] => Ok(*single),
            _ => Err(KineticsError::IncompleteReaction(format!(
                "photocatalytic kinetics needs exactly one reagent, found {}",
                reagents.len()
            ))),
        }
    }
}

impl RateLaw for PhotocatalyticStruct {
    fn law(&self) -> KineticLaw {
        KineticLaw::Photocatalytic
    }

    fn unknown_parameters(&self) -> Vec<&'static str> {
        Self::PARAMETER_NAMES
            .iter()
            .zip(self.values())
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect()
    }

    fn rate_latex(&self, stoichiometry: &Stoichiometry, _exponents: &Exponents) -> Option<String> {
        let c = match self.reagent(stoichiometry) {
            Ok(id) => format!("C_{{{}}}", id),
            Err(_) => "C".to_string(),
        };
        // exponent written with a minus: the form rendered +Abs/l, which gives
        // a negative absorbed fraction
        Some(format!(
            r"\phi \cdot E_{{p,0}} \frac{{\varepsilon \cdot {} \cdot l}}{{Abs}} \left(1 - 10^{{ -\frac{{Abs}}{{l}} \cdot l_{{reactor}} }}\right)",
            c
        ))
    }

    fn rate(
        &self,
        stoichiometry: &Stoichiometry,
        _exponents: &Exponents,
        concentrations: &HashMap<String, f64>,
    ) -> KineticsResult<f64> {
        let phi = required(self.phi, "phi")?;
        let ep0 = required(self.Ep0, "Ep0")?;
        let epsilon = required(self.epsilon, "epsilon")?;
        let abs = required(self.Abs, "Abs")?;
        let l = required(self.l, "l")?;
        let l_reactor = required(self.l_reactor, "l_reactor")?;
        if abs == 0.0 || l == 0.0 {
            return Err(KineticsError::InvalidValue(
                "Abs and l must be nonzero".to_string(),
            ));
        }
        let c = concentration(concentrations, self.reagent(stoichiometry)?)?;
        let absorbed = 1.0 - 10f64.powf(-abs / l * l_reactor);
        Ok(phi * ep0 * (epsilon * c * l / abs) * absorbed)
    }

    fn rate_expr(&self, stoichiometry: &Stoichiometry, _exponents: &Exponents) -> KineticsResult<Expr> {
        let c = Expr::Var(concentration_name(self.reagent(stoichiometry)?));
        let phi = const_or_var(self.phi, "phi");
        let ep0 = const_or_var(self.Ep0, "Ep0");
        let epsilon = const_or_var(self.epsilon, "epsilon");
        let abs = const_or_var(self.Abs, "Abs");
        let l = const_or_var(self.l, "l");
        let l_reactor = const_or_var(self.l_reactor, "l_reactor");
        let attenuation = Expr::Pow(
            Box::new(Expr::Const(10.0)),
            Box::new(-(abs.clone() / l.clone() * l_reactor)),
        );
        let expr = phi * ep0 * (epsilon * c * l / abs) * (Expr::Const(1.0) - attenuation);
        Ok(expr)
    }
}

/// kinetic law together with its constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[enum_dispatch(RateLaw)]
#[serde(tag = "law")]
pub enum KineticParameters {
    PowerLaw(PowerLawStruct),
    Photocatalytic(PhotocatalyticStruct),
}

impl KineticParameters {
    /// all constants empty, as the form shows them after a law is chosen
    pub fn empty(law: KineticLaw) -> Self {
        match law {
            KineticLaw::PowerLaw => KineticParameters::PowerLaw(PowerLawStruct::default()),
            KineticLaw::Photocatalytic => {
                KineticParameters::Photocatalytic(PhotocatalyticStruct::default())
            }
        }
    }

    pub fn power_law(k: Option<f64>) -> Self {
        KineticParameters::PowerLaw(PowerLawStruct::new(k))
    }
}
