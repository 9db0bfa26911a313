use tlcalc::prelude::*;

const CONFIG: &str = r#"{
    "segments": [
        {
            "line": {
                "type": "coaxial",
                "inner_radius": 0.00045,
                "outer_radius": 0.00148,
                "shield_thickness": 0.0002,
                "conductivity": 5.8e7,
                "dielectric": {"permittivity": 2.25, "loss_tangent": 0.0002},
                "nominal_impedance": 50.0
            },
            "length": 25.0
        }
    ],
    "load": [100.0, -25.0],
    "reference_impedance": 50.0,
    "frequencies": {"kind": "log", "start": 1.0e6, "stop": 1.0e9, "npoints": 13},
    "parallel": true
}"#;

fn main() {
    env_logger::init();

    let config = SweepConfig::from_json(CONFIG).unwrap();
    let (sweep, frequencies) = config.build().unwrap();

    let result = sweep.run(RunDescriptor {
        frequencies: frequencies.as_slice().unwrap(),
        verbose: config.verbose,
        parallel: config.parallel,
    })
    .unwrap();

    println!("{}", serde_json::to_string_pretty(&result).unwrap());
}
