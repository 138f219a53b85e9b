use super::{CatalogDocument, CatalogEntry, CatalogModule};
use crate::port::{CalculatorDefinition, FieldDefinition, OutputDefinition, PortType};
use ahash::AHashMap;

fn entry(key: &str, name: &str) -> CatalogEntry {
    CatalogEntry {
        key: key.to_string(),
        name: name.to_string(),
    }
}

fn num(name: &str, label: &str, required: bool) -> FieldDefinition {
    FieldDefinition::new(name, label, PortType::Number, required)
}

fn out(name: &str, label: &str, output_type: PortType) -> OutputDefinition {
    OutputDefinition::new(name, label, output_type)
}

pub(super) fn document() -> CatalogDocument {
    let modules = vec![
        CatalogModule {
            key: "electrical".to_string(),
            name: "Electrical".to_string(),
            calculators: vec![
                entry("loadCalculation", "Load Calculation"),
                entry("cableSizing", "Cable Sizing"),
                entry("transformerSizing", "Transformer Sizing"),
            ],
        },
        CatalogModule {
            key: "mechanical".to_string(),
            name: "Mechanical".to_string(),
            calculators: vec![
                entry("pipeSizing", "Pipe Sizing"),
                entry("pumpSizing", "Pump Sizing"),
            ],
        },
        CatalogModule {
            key: "civil".to_string(),
            name: "Civil".to_string(),
            calculators: vec![
                entry("concreteVolume", "Concrete Volume"),
                entry("steelWeight", "Steel Weight"),
            ],
        },
    ];

    let mut calculators = AHashMap::new();
    calculators.insert(
        "loadCalculation".to_string(),
        CalculatorDefinition {
            fields: vec![
                num("power", "Power(kW)", true),
                num("voltage", "Voltage(V)", true),
                num("powerFactor", "Power Factor", false),
                FieldDefinition::select(
                    "systemType",
                    "System Type",
                    &[("3phase", "3-Phase"), ("1phase", "1-Phase")],
                ),
            ],
            outputs: vec![
                out("current", "Current(A)", PortType::Number),
                out("apparentPower", "Apparent Power(kVA)", PortType::Number),
            ],
        },
    );
    calculators.insert(
        "cableSizing".to_string(),
        CalculatorDefinition {
            fields: vec![
                num("current", "Current(A)", true),
                num("length", "Cable Length(m)", true),
                num("voltageSystem", "System Voltage(V)", true),
                FieldDefinition::select("standard", "Standard", &[("IEC", "IEC"), ("NEC", "NEC")]),
            ],
            outputs: vec![
                out("cableSize", "Cable Size(mm²)", PortType::String),
                out("voltageDrop", "Voltage Drop(%)", PortType::Number),
            ],
        },
    );
    calculators.insert(
        "transformerSizing".to_string(),
        CalculatorDefinition {
            fields: vec![
                num("totalLoad", "Total Load(kVA)", true),
                num("growthFactor", "Growth Factor", false),
                num("efficiency", "Efficiency (%)", false),
                FieldDefinition::select("standard", "Standard", &[("IEC", "IEC"), ("IEEE", "IEEE")]),
                FieldDefinition::select(
                    "coolingType",
                    "Cooling Type",
                    &[
                        ("ONAN", "ONAN"),
                        ("ONAF", "ONAF"),
                        ("OFAF", "OFAF"),
                        ("OFWF", "OFWF"),
                    ],
                ),
            ],
            outputs: vec![
                out("requiredKVA", "Required kVA", PortType::Number),
                out("standardSize", "Standard Size (kVA)", PortType::Number),
                out("loadingStatus", "Loading Status", PortType::String),
            ],
        },
    );
    calculators.insert(
        "pipeSizing".to_string(),
        CalculatorDefinition {
            fields: vec![
                num("flowRate", "Flow Rate(L/s)", true),
                num("velocity", "Velocity(m/s)", true),
            ],
            outputs: vec![out("diameter", "Pipe Diameter(mm)", PortType::Number)],
        },
    );
    calculators.insert(
        "pumpSizing".to_string(),
        CalculatorDefinition {
            fields: vec![
                num("flowRate", "Flow Rate(m³/h)", true),
                num("head", "Total Head(m)", true),
                num("efficiency", "Pump Efficiency(%)", false),
            ],
            outputs: vec![out("power", "Pump Power(kW)", PortType::Number)],
        },
    );
    calculators.insert(
        "concreteVolume".to_string(),
        CalculatorDefinition {
            fields: vec![
                num("length", "Length(m)", true),
                num("width", "Width(m)", true),
                num("height", "Height(m)", true),
                num("wastage", "Wastage(%)", false),
            ],
            outputs: vec![out("volume", "Volume(m³)", PortType::Number)],
        },
    );
    calculators.insert(
        "steelWeight".to_string(),
        CalculatorDefinition {
            fields: vec![
                num("diameter", "Bar Diameter(mm)", true),
                num("length", "Total Length(m)", true),
            ],
            outputs: vec![out("weight", "Weight(kg)", PortType::Number)],
        },
    );

    CatalogDocument {
        modules,
        calculators,
    }
}
