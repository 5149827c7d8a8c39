use super::expr::{LinExpr, Var};
use crate::error::ConstructionError;
use derive_more::Display;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Continuous,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Sense {
    #[display(fmt = "=")]
    Eq,
    #[display(fmt = "<=")]
    Le,
    #[display(fmt = ">=")]
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSense {
    Maximize,
    Minimize,
}

/// A scalar decision variable.
#[derive(Debug, Clone)]
pub struct VarDef {
    /// Full name, e.g. `qmo(r1,m1,SC1,tp1)`
    pub name: String,
    /// Position of the owning family in [`ModelDefinition::families`]
    pub family: usize,
    /// Set element labels of the index tuple
    pub index: Vec<String>,
    pub vtype: VarType,
    pub lb: f64,
    pub ub: f64,
}

/// A named family of variables sharing an index domain, e.g. `qmo` over (R, M, SC, TP).
#[derive(Debug, Clone)]
pub struct VarFamily {
    pub name: String,
    /// Names of the index sets, in index order
    pub domain: Vec<String>,
    pub vars: Vec<Var>,
}

/// `lhs ⋈ rhs`, before normalisation.
#[derive(Debug, Clone)]
pub struct IneqExpr {
    pub lhs: LinExpr,
    pub sense: Sense,
    pub rhs: LinExpr,
}

pub fn eq(lhs: impl Into<LinExpr>, rhs: impl Into<LinExpr>) -> IneqExpr {
    IneqExpr {
        lhs: lhs.into(),
        sense: Sense::Eq,
        rhs: rhs.into(),
    }
}

pub fn le(lhs: impl Into<LinExpr>, rhs: impl Into<LinExpr>) -> IneqExpr {
    IneqExpr {
        lhs: lhs.into(),
        sense: Sense::Le,
        rhs: rhs.into(),
    }
}

pub fn ge(lhs: impl Into<LinExpr>, rhs: impl Into<LinExpr>) -> IneqExpr {
    IneqExpr {
        lhs: lhs.into(),
        sense: Sense::Ge,
        rhs: rhs.into(),
    }
}

/// A constraint normalised to `Σ coeff * var ⋈ rhs`.
#[derive(Debug, Clone)]
pub struct Constr {
    pub name: String,
    pub terms: Vec<(Var, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl Constr {
    fn new(name: String, ineq: IneqExpr) -> Constr {
        let expr = ineq.lhs - ineq.rhs;
        Constr {
            name,
            terms: expr.compacted(),
            sense: ineq.sense,
            rhs: 0.0 - expr.constant_term(),
        }
    }

    /// The constraint family, i.e. the name up to the index list
    pub fn family(&self) -> &str {
        self.name.split('(').next().unwrap_or(&self.name)
    }

    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|(v, c)| c * values[v.0]).sum()
    }

    /// By how much `values` violates the constraint (0 if satisfied)
    pub fn violation(&self, values: &[f64]) -> f64 {
        self.violation_at(self.activity(values))
    }

    pub fn violation_at(&self, activity: f64) -> f64 {
        match self.sense {
            Sense::Eq => (activity - self.rhs).abs(),
            Sense::Le => (activity - self.rhs).max(0.0),
            Sense::Ge => (self.rhs - activity).max(0.0),
        }
    }
}

/// Incrementally assembles a [`ModelDefinition`].
pub struct Model {
    name: String,
    vars: Vec<VarDef>,
    families: Vec<VarFamily>,
    constrs: Vec<Constr>,
    objective: LinExpr,
    sense: ModelSense,
}

impl Model {
    pub fn new(name: &str) -> Model {
        Model {
            name: name.to_string(),
            vars: Vec::new(),
            families: Vec::new(),
            constrs: Vec::new(),
            objective: LinExpr::new(),
            sense: ModelSense::Maximize,
        }
    }

    /// Register a variable family. Returns its id, to be passed to [`Model::add_var`].
    pub fn add_family(&mut self, name: &str, domain: &[&str]) -> usize {
        self.families.push(VarFamily {
            name: name.to_string(),
            domain: domain.iter().map(|s| s.to_string()).collect(),
            vars: Vec::new(),
        });
        self.families.len() - 1
    }

    pub fn add_var(
        &mut self,
        family: usize,
        index: &[&str],
        vtype: VarType,
        lb: f64,
        ub: f64,
    ) -> Result<Var, ConstructionError> {
        let owner = &mut self.families[family];
        let name = format!("{}({})", owner.name, index.join(","));
        if lb > ub {
            return Err(ConstructionError::InconsistentBounds {
                name,
                lower: lb,
                upper: ub,
            });
        }

        let var = Var(self.vars.len());
        owner.vars.push(var);
        self.vars.push(VarDef {
            name,
            family,
            index: index.iter().map(|s| s.to_string()).collect(),
            vtype,
            lb,
            ub,
        });
        Ok(var)
    }

    pub fn add_constr(&mut self, name: &str, ineq: IneqExpr) {
        trace!("adding constraint {}", name);
        self.constrs.push(Constr::new(name.to_string(), ineq));
    }

    pub fn set_objective(&mut self, expr: impl Into<LinExpr>, sense: ModelSense) {
        self.objective = expr.into();
        self.sense = sense;
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn num_constrs(&self) -> usize {
        self.constrs.len()
    }

    /// Freeze the model.
    pub fn finish(self) -> ModelDefinition {
        ModelDefinition {
            name: self.name,
            vars: self.vars,
            families: self.families,
            constrs: self.constrs,
            objective: self.objective,
            sense: self.sense,
        }
    }
}

/// Solver-agnostic, immutable description of an LP/MILP instance.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    name: String,
    vars: Vec<VarDef>,
    families: Vec<VarFamily>,
    constrs: Vec<Constr>,
    objective: LinExpr,
    sense: ModelSense,
}

impl ModelDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &[VarDef] {
        &self.vars
    }

    pub fn var(&self, var: Var) -> &VarDef {
        &self.vars[var.0]
    }

    pub fn families(&self) -> &[VarFamily] {
        &self.families
    }

    pub fn family(&self, name: &str) -> Option<&VarFamily> {
        self.families.iter().find(|f| f.name == name)
    }

    /// Look up a variable by family name and index labels
    pub fn lookup(&self, family: &str, index: &[&str]) -> Option<Var> {
        self.family(family)?
            .vars
            .iter()
            .copied()
            .find(|v| self.vars[v.0].index.iter().map(String::as_str).eq(index.iter().copied()))
    }

    pub fn constrs(&self) -> &[Constr] {
        &self.constrs
    }

    pub fn constr(&self, name: &str) -> Option<&Constr> {
        self.constrs.iter().find(|c| c.name == name)
    }

    /// Constraints belonging to the family `family`
    pub fn constr_family<'a>(&'a self, family: &'a str) -> impl Iterator<Item = &'a Constr> + 'a {
        self.constrs.iter().filter(move |c| c.family() == family)
    }

    pub fn objective(&self) -> &LinExpr {
        &self.objective
    }

    pub fn sense(&self) -> ModelSense {
        self.sense
    }

    pub fn is_mip(&self) -> bool {
        self.vars.iter().any(|v| v.vtype == VarType::Binary)
    }

    /// Constraints that hold no variable term and are violated by more than `tol`
    pub fn violated_constant_constrs(&self, tol: f64) -> impl Iterator<Item = &Constr> {
        self.constrs
            .iter()
            .filter(move |c| c.terms.is_empty() && c.violation_at(0.0) > tol)
    }

    /// Constraints violated by more than `tol` at `values`, with the size of the violation
    pub fn check_feasibility(&self, values: &[f64], tol: f64) -> Vec<(&Constr, f64)> {
        self.constrs
            .iter()
            .map(|c| (c, c.violation(values)))
            .filter(|(_, violation)| *violation > tol)
            .collect()
    }

    /// The largest violation of any constraint or variable bound by `values`
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        let constrs = self.constrs.iter().map(|c| c.violation(values));
        let bounds = self
            .vars
            .iter()
            .zip(values)
            .map(|(v, &x)| (v.lb - x).max(x - v.ub).max(0.0));
        constrs.chain(bounds).fold(0.0, f64::max)
    }
}
