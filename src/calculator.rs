use crate::error::CalculationError;
use crate::value::{Inputs, Outputs};
use ahash::AHashMap;
use async_trait::async_trait;
use std::sync::Arc;

/// A calculation a node can invoke. Implementations typically forward the
/// inputs to a remote calculation service.
#[async_trait]
pub trait Calculator: Send + Sync {
    async fn calculate(&self, inputs: &Inputs) -> Result<Outputs, CalculationError>;
}

/// Adapts a synchronous closure into a `Calculator`.
pub struct FnCalculator<F> {
    func: F,
}

impl<F> FnCalculator<F>
where
    F: Fn(&Inputs) -> Result<Outputs, CalculationError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> Calculator for FnCalculator<F>
where
    F: Fn(&Inputs) -> Result<Outputs, CalculationError> + Send + Sync,
{
    async fn calculate(&self, inputs: &Inputs) -> Result<Outputs, CalculationError> {
        (self.func)(inputs)
    }
}

/// Maps calculator keys to their implementations. Built once at startup and
/// handed to the executor.
#[derive(Clone, Default)]
pub struct CalculatorRegistry {
    calculators: AHashMap<String, Arc<dyn Calculator>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, calc_key: &str, calculator: Arc<dyn Calculator>) {
        self.calculators.insert(calc_key.to_string(), calculator);
    }

    pub fn register_fn<F>(&mut self, calc_key: &str, func: F)
    where
        F: Fn(&Inputs) -> Result<Outputs, CalculationError> + Send + Sync + 'static,
    {
        self.register(calc_key, Arc::new(FnCalculator::new(func)));
    }

    /// Builder-style variant of [`register_fn`](Self::register_fn).
    pub fn with_fn<F>(mut self, calc_key: &str, func: F) -> Self
    where
        F: Fn(&Inputs) -> Result<Outputs, CalculationError> + Send + Sync + 'static,
    {
        self.register_fn(calc_key, func);
        self
    }

    pub fn get(&self, calc_key: &str) -> Option<&Arc<dyn Calculator>> {
        self.calculators.get(calc_key)
    }

    pub fn contains(&self, calc_key: &str) -> bool {
        self.calculators.contains_key(calc_key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.calculators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}

impl std::fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.calculators.keys().collect();
        keys.sort();
        f.debug_struct("CalculatorRegistry")
            .field("calculators", &keys)
            .finish()
    }
}
