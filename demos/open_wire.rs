use tlcalc::prelude::*;
use tlcalc::consts::COPPER_CONDUCTIVITY;

fn main() {
    env_logger::init();

    // 10 m of 600 Ω open-wire line feeding a coax run to a dipole
    let open_wire = ParallelWireLine {
        diameter: 2e-3, // [m]
        spacing: 0.15, // [m]
        conductivity: COPPER_CONDUCTIVITY,
        dielectric: Dielectric::AIR,
        nominal_impedance: Some(600.0),
    };

    let sweep = Sweep::new(SweepDescriptor {
        segments: vec![
            Segment::new(open_wire, 10.0),
            Segment::new(LossModelLine::default(), 3.0),
        ],
        termination: Termination::new(
            // crude half-wave dipole near 14.2 MHz
            Load::varying(|f| {
                let detune = (f - 14.2e6) / 14.2e6;
                Complex64::new(73.0, 900.0 * detune)
            }),
            50.0,
        ),
    })
    .unwrap();

    let frequencies = FrequencySweep::Linear { start: 13.5e6, stop: 15.0e6, npoints: 16 }
        .resolve()
        .unwrap();

    let result = sweep.run(RunDescriptor {
        frequencies: frequencies.as_slice().unwrap(),
        verbose: true,
        parallel: false,
    })
    .unwrap();

    println!(
        "\n{:>10}  {:>22}  {:>8}  {:>10}  {:>10}",
        "f [MHz]", "Zin [Ω]", "VSWR", "ML [dB]", "TL [dB]",
    );
    for record in &result {
        println!(
            "{:>10.3}  {:>22.2}  {:>8.2}  {:>10.3}  {:>10.3}",
            record.frequency / 1e6,
            record.input_impedance,
            record.vswr,
            record.matched_loss_db,
            record.total_loss_db,
        );
    }
}
