//! Common test utilities for building catalogs, graphs and calculator registries.
use calcflow::prelude::*;

/// A small catalog with one calculator per port-type combination we care about.
///
/// * `num`:   input `x` (number, required) -> outputs `y` (number), `label` (string), `data` (any)
/// * `text`:  input `s` (string, required) -> output `out` (string)
/// * `sink`:  input `v` (any, required) -> default `result` (object) output
/// * `multi`: inputs `i0`..`i7` (number, optional) -> output `sum` (number)
#[allow(dead_code)]
pub fn test_catalog() -> CalculatorCatalog {
    CalculatorCatalog::new()
        .with_calculator(
            "test",
            "num",
            "Number",
            CalculatorDefinition {
                fields: vec![FieldDefinition::new("x", "X", PortType::Number, true)],
                outputs: vec![
                    OutputDefinition::new("y", "Y", PortType::Number),
                    OutputDefinition::new("label", "Label", PortType::String),
                    OutputDefinition::new("data", "Data", PortType::Any),
                ],
            },
        )
        .with_calculator(
            "test",
            "text",
            "Text",
            CalculatorDefinition {
                fields: vec![FieldDefinition::new("s", "S", PortType::String, true)],
                outputs: vec![OutputDefinition::new("out", "Out", PortType::String)],
            },
        )
        .with_calculator(
            "test",
            "sink",
            "Sink",
            CalculatorDefinition {
                fields: vec![FieldDefinition::new("v", "V", PortType::Any, true)],
                outputs: vec![],
            },
        )
        .with_calculator(
            "test",
            "multi",
            "Multi",
            CalculatorDefinition {
                fields: (0..8)
                    .map(|i| {
                        FieldDefinition::new(&format!("i{}", i), &format!("In {}", i), PortType::Number, false)
                    })
                    .collect(),
                outputs: vec![OutputDefinition::new("sum", "Sum", PortType::Number)],
            },
        )
}

/// Adds a node of `calc_key` from the `test` module with a fixed id.
#[allow(dead_code)]
pub fn add_node(graph: &mut Graph, catalog: &CalculatorCatalog, id: u64, calc_key: &str) -> NodeId {
    let node = Node::new(
        NodeId(id),
        &format!("{} {}", calc_key, id),
        "test",
        calc_key,
        Position::new(id as f64 * 10.0, 0.0),
        catalog.definition_or_default(calc_key),
    );
    graph.add_node(node)
}

/// `count` `num` nodes with ids 1..=count, chained `y -> x`.
#[allow(dead_code)]
pub fn num_chain(catalog: &CalculatorCatalog, count: u64) -> Graph {
    let mut graph = Graph::new();
    for id in 1..=count {
        add_node(&mut graph, catalog, id, "num");
    }
    for id in 1..count {
        graph
            .connect(NodeId(id), 0, NodeId(id + 1), 0)
            .expect("chain connection should be valid");
    }
    graph
}

/// Registry for the `test` catalog: `num` doubles `x`, `text` echoes `s`.
#[allow(dead_code)]
pub fn test_registry() -> CalculatorRegistry {
    CalculatorRegistry::new()
        .with_fn("num", |inputs| {
            let x = inputs
                .get("x")
                .and_then(Value::as_f64)
                .ok_or_else(|| CalculationError::InvalidInput {
                    field: "x".to_string(),
                    message: "expected a number".to_string(),
                })?;
            let mut out = Outputs::new();
            out.insert("y".to_string(), Value::from(x * 2.0));
            out.insert("label".to_string(), Value::from(format!("x={}", x)));
            out.insert("data".to_string(), Value::from(x));
            Ok(out)
        })
        .with_fn("text", |inputs| {
            let mut out = Outputs::new();
            out.insert("out".to_string(), inputs.get("s").cloned().unwrap_or_default());
            Ok(out)
        })
}

/// Simplified stand-ins for the electrical calculators of the built-in catalog.
#[allow(dead_code)]
pub fn electrical_registry() -> CalculatorRegistry {
    let num = |inputs: &Inputs, name: &str| inputs.get(name).and_then(Value::as_f64).unwrap_or(0.0);
    CalculatorRegistry::new()
        .with_fn("loadCalculation", move |inputs| {
            let power = num(inputs, "power");
            let voltage = num(inputs, "voltage");
            if voltage == 0.0 {
                return Err(CalculationError::failed("Voltage must be non-zero"));
            }
            let mut out = Outputs::new();
            out.insert("current".to_string(), Value::from(power * 1000.0 / voltage));
            out.insert("apparentPower".to_string(), Value::from(power));
            Ok(out)
        })
        .with_fn("cableSizing", move |inputs| {
            let current = num(inputs, "current");
            let length = num(inputs, "length");
            let mut out = Outputs::new();
            out.insert("cableSize".to_string(), Value::from("16"));
            out.insert("voltageDrop".to_string(), Value::from(current * length / 1000.0));
            Ok(out)
        })
        .with_fn("transformerSizing", move |inputs| {
            let mut out = Outputs::new();
            out.insert("requiredKVA".to_string(), Value::from(num(inputs, "totalLoad") * 1.25));
            Ok(out)
        })
}

/// Adds a built-in catalog node with a fixed id.
#[allow(dead_code)]
pub fn add_builtin_node(graph: &mut Graph, catalog: &CalculatorCatalog, id: u64, module_key: &str, calc_key: &str) -> NodeId {
    let name = catalog
        .lookup(module_key, calc_key)
        .map(|e| e.name.clone())
        .expect("calculator should be in the built-in catalog");
    graph.add_node(Node::new(
        NodeId(id),
        &name,
        module_key,
        calc_key,
        Position::new(id as f64, 100.0),
        catalog.definition_or_default(calc_key),
    ))
}
