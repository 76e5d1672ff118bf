//! Domain registry: input schemas, emitted quantity kinds, and risk
//! threshold tables for each supported emission domain.
//!
//! Every domain runs the same encode → predict → classify → aggregate
//! pipeline; only the data in its [`DomainSpec`] differs.

use clap::ValueEnum;

/// The four supported emission domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Domain {
    Electricity,
    Explosives,
    Fuel,
    Transport,
}

/// How a schema field is interpreted during encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Categorical,
    Numeric,
}

/// One field of a domain's input schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Whether the field is part of the model input vector. Fields with
    /// `model_input: false` (e.g. transport unit labels) are required on
    /// input but carried as metadata only.
    pub model_input: bool,
}

/// Static description of one domain's pipeline instance.
pub struct DomainSpec {
    pub domain: Domain,
    /// Input schema in the order the predictor expects its features.
    pub fields: &'static [FieldSpec],
    /// Field whose value labels the entity for a record (fuel type,
    /// transport method, ...).
    pub entity_field: &'static str,
    /// Quantity kinds the predictor emits, in output order.
    pub kinds: &'static [&'static str],
    /// Ascending `[t1, t2, t3]` risk cut points per quantity kind.
    pub thresholds: &'static [(&'static str, [f64; 3])],
}

impl DomainSpec {
    /// Number of features the model input vector carries.
    pub fn model_input_len(&self) -> usize {
        self.fields.iter().filter(|f| f.model_input).count()
    }

    /// Schema fields that feed the model, in predictor order.
    pub fn model_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.model_input)
    }
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Electricity,
        Domain::Explosives,
        Domain::Fuel,
        Domain::Transport,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Electricity => "electricity",
            Domain::Explosives => "explosives",
            Domain::Fuel => "fuel",
            Domain::Transport => "transport",
        }
    }

    pub fn spec(self) -> &'static DomainSpec {
        match self {
            Domain::Electricity => &ELECTRICITY,
            Domain::Explosives => &EXPLOSIVES,
            Domain::Fuel => &FUEL,
            Domain::Transport => &TRANSPORT,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static ELECTRICITY: DomainSpec = DomainSpec {
    domain: Domain::Electricity,
    fields: &[
        FieldSpec {
            name: "stateName",
            kind: FieldKind::Categorical,
            model_input: true,
        },
        FieldSpec {
            name: "energyPerTime",
            kind: FieldKind::Numeric,
            model_input: true,
        },
        FieldSpec {
            name: "responsibleArea",
            kind: FieldKind::Numeric,
            model_input: true,
        },
        FieldSpec {
            name: "totalArea",
            kind: FieldKind::Numeric,
            model_input: true,
        },
    ],
    entity_field: "stateName",
    kinds: &["CO2 (kg)"],
    thresholds: &[("CO2 (kg)", [300.0, 700.0, 1200.0])],
};

static EXPLOSIVES: DomainSpec = DomainSpec {
    domain: Domain::Explosives,
    fields: &[
        FieldSpec {
            name: "explosiveType",
            kind: FieldKind::Categorical,
            model_input: true,
        },
        FieldSpec {
            name: "amount",
            kind: FieldKind::Numeric,
            model_input: true,
        },
    ],
    entity_field: "explosiveType",
    kinds: &["CO", "NOx", "NH3", "HCN", "H2S", "SO2", "CO2"],
    thresholds: &[
        ("CO", [400.0, 700.0, 1000.0]),
        ("NOx", [20.0, 40.0, 60.0]),
        ("NH3", [50.0, 80.0, 120.0]),
        ("HCN", [20.0, 50.0, 80.0]),
        ("H2S", [20.0, 50.0, 80.0]),
        ("SO2", [1.0, 5.0, 10.0]),
        ("CO2", [1000.0, 5000.0, 10000.0]),
    ],
};

static FUEL: DomainSpec = DomainSpec {
    domain: Domain::Fuel,
    fields: &[
        FieldSpec {
            name: "fuelType",
            kind: FieldKind::Categorical,
            model_input: true,
        },
        FieldSpec {
            name: "volume",
            kind: FieldKind::Numeric,
            model_input: true,
        },
    ],
    entity_field: "fuelType",
    kinds: &[
        "CO2 (kg)",
        "Nitrous Oxide CO2e (kg)",
        "Methane CO2e (kg)",
        "Total Direct CO2e (kg)",
        "Indirect CO2e (kg)",
        "Life Cycle CO2e (kg)",
    ],
    thresholds: &[
        ("CO2 (kg)", [2000.0, 9000.0, 15000.0]),
        ("Nitrous Oxide CO2e (kg)", [200.0, 500.0, 1000.0]),
        ("Methane CO2e (kg)", [30.0, 100.0, 200.0]),
        ("Total Direct CO2e (kg)", [2000.0, 9000.0, 15000.0]),
        ("Indirect CO2e (kg)", [500.0, 1000.0, 1500.0]),
        ("Life Cycle CO2e (kg)", [10000.0, 15000.0, 20000.0]),
    ],
};

static TRANSPORT: DomainSpec = DomainSpec {
    domain: Domain::Transport,
    fields: &[
        FieldSpec {
            name: "weightUnit",
            kind: FieldKind::Categorical,
            model_input: false,
        },
        FieldSpec {
            name: "weightValue",
            kind: FieldKind::Numeric,
            model_input: true,
        },
        FieldSpec {
            name: "distanceUnit",
            kind: FieldKind::Categorical,
            model_input: false,
        },
        FieldSpec {
            name: "distanceValue",
            kind: FieldKind::Numeric,
            model_input: true,
        },
        FieldSpec {
            name: "transportMethod",
            kind: FieldKind::Categorical,
            model_input: true,
        },
    ],
    entity_field: "transportMethod",
    kinds: &["CO2 (kg)"],
    thresholds: &[("CO2 (kg)", [500.0, 2000.0, 5000.0])],
};
