use crate::error::ConstructionError;
use crate::lp::{Model, Var, VarType};
use crate::models::supply_chain::sets_and_parameters::Set;

/// Creates one variable per element of a Cartesian product of sets, named after the labels.
pub trait AddVars<'a> {
    type Out;

    /// The names of the index sets
    fn domain(&self) -> Vec<&'static str>;

    /// Walk the product, calling `func` with the labels of every index tuple
    fn nest<F>(
        &self,
        prefix: &mut Vec<&'a str>,
        func: &mut F,
    ) -> Result<Self::Out, ConstructionError>
    where
        F: FnMut(&[&str]) -> Result<Var, ConstructionError>;

    /// Create a family of variables of any type
    fn vars(
        &self,
        model: &mut Model,
        family: &str,
        vtype: VarType,
        lb: f64,
        ub: f64,
    ) -> Result<Self::Out, ConstructionError> {
        let id = model.add_family(family, &self.domain());
        let mut prefix = Vec::new();
        self.nest(&mut prefix, &mut |labels: &[&str]| {
            model.add_var(id, labels, vtype, lb, ub)
        })
    }

    /// Binary variables
    fn binary(&self, model: &mut Model, family: &str) -> Result<Self::Out, ConstructionError> {
        self.vars(model, family, VarType::Binary, 0.0, 1.0)
    }

    /// Continuous non-negative variables
    fn cont(&self, model: &mut Model, family: &str) -> Result<Self::Out, ConstructionError> {
        self.vars(model, family, VarType::Continuous, 0.0, f64::INFINITY)
    }
}

impl<'a> AddVars<'a> for &'a Set {
    type Out = Vec<Var>;

    fn domain(&self) -> Vec<&'static str> {
        vec![self.name()]
    }

    fn nest<F>(
        &self,
        prefix: &mut Vec<&'a str>,
        func: &mut F,
    ) -> Result<Self::Out, ConstructionError>
    where
        F: FnMut(&[&str]) -> Result<Var, ConstructionError>,
    {
        let set: &'a Set = *self;
        let mut out = Vec::with_capacity(set.len());
        for label in set.labels() {
            prefix.push(label);
            out.push(func(&prefix[..])?);
            prefix.pop();
        }
        Ok(out)
    }
}

impl<'a> AddVars<'a> for (&'a Set, &'a Set) {
    type Out = Vec<<&'a Set as AddVars<'a>>::Out>;

    fn domain(&self) -> Vec<&'static str> {
        vec![self.0.name(), self.1.name()]
    }

    fn nest<F>(
        &self,
        prefix: &mut Vec<&'a str>,
        func: &mut F,
    ) -> Result<Self::Out, ConstructionError>
    where
        F: FnMut(&[&str]) -> Result<Var, ConstructionError>,
    {
        let head: &'a Set = self.0;
        let mut out = Vec::with_capacity(head.len());
        for label in head.labels() {
            prefix.push(label);
            out.push(self.1.nest(prefix, func)?);
            prefix.pop();
        }
        Ok(out)
    }
}

impl<'a> AddVars<'a> for (&'a Set, &'a Set, &'a Set) {
    type Out = Vec<<(&'a Set, &'a Set) as AddVars<'a>>::Out>;

    fn domain(&self) -> Vec<&'static str> {
        vec![self.0.name(), self.1.name(), self.2.name()]
    }

    fn nest<F>(
        &self,
        prefix: &mut Vec<&'a str>,
        func: &mut F,
    ) -> Result<Self::Out, ConstructionError>
    where
        F: FnMut(&[&str]) -> Result<Var, ConstructionError>,
    {
        let head: &'a Set = self.0;
        let tail = (self.1, self.2);
        let mut out = Vec::with_capacity(head.len());
        for label in head.labels() {
            prefix.push(label);
            out.push(tail.nest(prefix, func)?);
            prefix.pop();
        }
        Ok(out)
    }
}

impl<'a> AddVars<'a> for (&'a Set, &'a Set, &'a Set, &'a Set) {
    type Out = Vec<<(&'a Set, &'a Set, &'a Set) as AddVars<'a>>::Out>;

    fn domain(&self) -> Vec<&'static str> {
        vec![self.0.name(), self.1.name(), self.2.name(), self.3.name()]
    }

    fn nest<F>(
        &self,
        prefix: &mut Vec<&'a str>,
        func: &mut F,
    ) -> Result<Self::Out, ConstructionError>
    where
        F: FnMut(&[&str]) -> Result<Var, ConstructionError>,
    {
        let head: &'a Set = self.0;
        let tail = (self.1, self.2, self.3);
        let mut out = Vec::with_capacity(head.len());
        for label in head.labels() {
            prefix.push(label);
            out.push(tail.nest(prefix, func)?);
            prefix.pop();
        }
        Ok(out)
    }
}

impl<'a> AddVars<'a> for (&'a Set, &'a Set, &'a Set, &'a Set, &'a Set) {
    type Out = Vec<<(&'a Set, &'a Set, &'a Set, &'a Set) as AddVars<'a>>::Out>;

    fn domain(&self) -> Vec<&'static str> {
        vec![
            self.0.name(),
            self.1.name(),
            self.2.name(),
            self.3.name(),
            self.4.name(),
        ]
    }

    fn nest<F>(
        &self,
        prefix: &mut Vec<&'a str>,
        func: &mut F,
    ) -> Result<Self::Out, ConstructionError>
    where
        F: FnMut(&[&str]) -> Result<Var, ConstructionError>,
    {
        let head: &'a Set = self.0;
        let tail = (self.1, self.2, self.3, self.4);
        let mut out = Vec::with_capacity(head.len());
        for label in head.labels() {
            prefix.push(label);
            out.push(tail.nest(prefix, func)?);
            prefix.pop();
        }
        Ok(out)
    }
}

impl<'a> AddVars<'a> for (&'a Set, &'a Set, &'a Set, &'a Set, &'a Set, &'a Set) {
    type Out = Vec<<(&'a Set, &'a Set, &'a Set, &'a Set, &'a Set) as AddVars<'a>>::Out>;

    fn domain(&self) -> Vec<&'static str> {
        vec![
            self.0.name(),
            self.1.name(),
            self.2.name(),
            self.3.name(),
            self.4.name(),
            self.5.name(),
        ]
    }

    fn nest<F>(
        &self,
        prefix: &mut Vec<&'a str>,
        func: &mut F,
    ) -> Result<Self::Out, ConstructionError>
    where
        F: FnMut(&[&str]) -> Result<Var, ConstructionError>,
    {
        let head: &'a Set = self.0;
        let tail = (self.1, self.2, self.3, self.4, self.5);
        let mut out = Vec::with_capacity(head.len());
        for label in head.labels() {
            prefix.push(label);
            out.push(tail.nest(prefix, func)?);
            prefix.pop();
        }
        Ok(out)
    }
}

/// Trait that converts variables to their values in a solution
pub trait ConvertVars {
    type Out;
    fn convert(&self, values: &[f64]) -> Self::Out;
}

impl<T: ConvertVars> ConvertVars for Vec<T> {
    type Out = Vec<T::Out>;

    fn convert(&self, values: &[f64]) -> Self::Out {
        self.iter().map(|e| e.convert(values)).collect()
    }
}

impl ConvertVars for Var {
    type Out = f64;

    fn convert(&self, values: &[f64]) -> Self::Out {
        values[self.index()]
    }
}
