use log::{debug, info, warn};
use ndarray::{Array1, ArrayView1, Zip};
use num_complex::Complex64;
use serde::Serialize;

use crate::cascade::{reflection_coefficient, vswr, Segment, SolvedCascade, Termination};
use crate::propagation::PropagationResult;
use crate::{check_frequency, Error};

/// Relative deviation of Re Z0 from a declared nominal impedance that is
/// reported as a warning.
const NOMINAL_TOLERANCE: f64 = 0.05;

/// Describes the line and load a sweep evaluates.
pub struct SweepDescriptor {
    /// The line, ordered from the source to the load.
    pub segments: Vec<Segment>,
    pub termination: Termination,
}

/// Describes a sweep run.
pub struct RunDescriptor<'a> {
    /// The frequencies [Hz] to evaluate, in output order.
    pub frequencies: &'a [f64],
    /// Whether or not to show progress on the console.
    pub verbose: bool,
    /// Whether or not to evaluate frequency points on the rayon thread pool.
    pub parallel: bool,
}

/// Everything computed at one frequency.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepRecord {
    /// [Hz]
    pub frequency: f64,
    /// Impedance seen at the source end [Ω].
    pub input_impedance: Complex64,
    /// Reflection coefficient of the input impedance against the reference.
    pub reflection_coefficient: Complex64,
    /// `f64::INFINITY` under total reflection.
    pub vswr: f64,
    /// Loss if every segment were terminated in its own Z0 [dB].
    pub matched_loss_db: f64,
    /// Loss with the actual load, including the extra loss from standing
    /// waves [dB].
    pub total_loss_db: f64,
    /// Solution of each segment, source first.
    pub segments: Vec<PropagationResult>,
}

/// The records of a sweep, in the order the frequencies were given.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepResult {
    records: Vec<SweepRecord>,
}

impl SweepResult {
    #[inline]
    pub fn records(&self) -> &[SweepRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SweepRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<SweepRecord> {
        self.records
    }

    fn column<T, F: Fn(&SweepRecord) -> T>(&self, f: F) -> Array1<T> {
        self.records.iter().map(f).collect()
    }

    pub fn frequencies(&self) -> Array1<f64> {
        self.column(|r| r.frequency)
    }

    pub fn input_impedances(&self) -> Array1<Complex64> {
        self.column(|r| r.input_impedance)
    }

    pub fn reflection_coefficients(&self) -> Array1<Complex64> {
        self.column(|r| r.reflection_coefficient)
    }

    pub fn vswr(&self) -> Array1<f64> {
        self.column(|r| r.vswr)
    }

    pub fn matched_loss_db(&self) -> Array1<f64> {
        self.column(|r| r.matched_loss_db)
    }

    pub fn total_loss_db(&self) -> Array1<f64> {
        self.column(|r| r.total_loss_db)
    }
}

impl<'a> IntoIterator for &'a SweepResult {
    type Item = &'a SweepRecord;
    type IntoIter = std::slice::Iter<'a, SweepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A validated cascade and termination, ready to be swept.
#[derive(Debug)]
pub struct Sweep {
    segments: Vec<Segment>,
    termination: Termination,
}

impl Sweep {
    /// Creates a new `Sweep` instance.
    pub fn new(desc: SweepDescriptor) -> Result<Self, Error> {
        for segment in desc.segments.iter() {
            segment.validate()?;
        }
        desc.termination.validate()?;

        Ok(Self {
            segments: desc.segments,
            termination: desc.termination,
        })
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    /// Evaluates a single frequency point.
    pub fn evaluate(&self, frequency: f64) -> Result<SweepRecord, Error> {
        evaluate(&self.segments, &self.termination, frequency)
    }

    /// Evaluates every frequency in `desc`.
    ///
    /// The first failing point, in frequency order, fails the whole sweep.
    pub fn run(&self, desc: RunDescriptor) -> Result<SweepResult, Error> {
        sweep(&self.segments, &self.termination, desc)
    }
}

fn sweep(
    segments: &[Segment],
    termination: &Termination,
    desc: RunDescriptor,
) -> Result<SweepResult, Error> {
    let npoints = desc.frequencies.len();
    if npoints == 0 {
        return Err(Error::EmptySweep);
    }
    info!(
        "sweeping {} frequencies over {} segment(s){}",
        npoints,
        segments.len(),
        if desc.parallel { " in parallel" } else { "" },
    );

    // setup output if verbose
    let bar = if desc.verbose {
        Some(indicatif::ProgressBar::new(npoints as u64))
    } else {
        None
    };

    let point = |&frequency: &f64| {
        let record = evaluate(segments, termination, frequency);
        if let Some(ref bar) = bar {
            bar.inc(1);
        }
        record
    };

    // one slot per frequency, so completion order never affects output order
    let frequencies = ArrayView1::from(desc.frequencies);
    let slots = if desc.parallel {
        Zip::from(frequencies).par_map_collect(point)
    } else {
        Zip::from(frequencies).map_collect(point)
    };

    if let Some(ref bar) = bar {
        bar.finish();
    }

    let records = slots.into_raw_vec().into_iter().collect::<Result<Vec<_>, _>>()?;
    check_nominal_impedance(segments, &records);
    info!("sweep finished ({} points)", records.len());

    Ok(SweepResult { records })
}

/// Number of records where Re Z0 of segment `index` is further than the
/// tolerance from `nominal`.
fn deviating_points(records: &[SweepRecord], index: usize, nominal: f64) -> usize {
    records
        .iter()
        .filter(|r| (r.segments[index].z0.re - nominal).abs() > NOMINAL_TOLERANCE * nominal)
        .count()
}

fn check_nominal_impedance(segments: &[Segment], records: &[SweepRecord]) {
    for (index, segment) in segments.iter().enumerate() {
        let nominal = match segment.line.nominal_impedance() {
            Some(nominal) => nominal,
            None => continue,
        };
        let deviating = deviating_points(records, index, nominal);
        if deviating > 0 {
            warn!(
                "segment {}: Re(Z0) is more than {}% from its nominal {} ohm at {} of {} frequencies",
                index,
                NOMINAL_TOLERANCE * 100.0,
                nominal,
                deviating,
                records.len(),
            );
        }
    }
}

fn evaluate(
    segments: &[Segment],
    termination: &Termination,
    frequency: f64,
) -> Result<SweepRecord, Error> {
    let frequency = check_frequency(frequency)?;
    let cascade = SolvedCascade::solve(segments, frequency)?;

    let load = termination.load.impedance(frequency);
    let input_impedance = cascade.input_impedance(load);
    let reflection = reflection_coefficient(input_impedance, termination.reference_impedance);

    let record = SweepRecord {
        frequency,
        input_impedance,
        reflection_coefficient: reflection,
        vswr: vswr(reflection),
        matched_loss_db: cascade.matched_loss_db(),
        total_loss_db: cascade.total_loss_db(load),
        segments: cascade.solutions().to_vec(),
    };
    debug!(
        "{:.6e} Hz: Zin = {:.4}, VSWR = {:.4}, loss = {:.4} dB",
        frequency, record.input_impedance, record.vswr, record.total_loss_db,
    );

    Ok(record)
}

/// Sweeps `segments` (source to load) ending in `termination` over
/// `frequencies` [Hz], serially and without progress output.
pub fn run(
    segments: &[Segment],
    termination: &Termination,
    frequencies: &[f64],
) -> Result<SweepResult, Error> {
    for segment in segments {
        segment.validate()?;
    }
    termination.validate()?;

    sweep(
        segments,
        termination,
        RunDescriptor {
            frequencies,
            verbose: false,
            parallel: false,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::{CoaxialLine, Dielectric, LossModelLine};
    use approx::assert_relative_eq;

    fn rg303_sweep(length: f64, load: Complex64) -> Sweep {
        Sweep::new(SweepDescriptor {
            segments: vec![Segment::new(LossModelLine::default(), length)],
            termination: Termination::new(load, 50.0),
        })
        .unwrap()
    }

    #[test]
    fn empty_sweep_is_rejected() {
        let sweep = rg303_sweep(10.0, Complex64::new(50.0, 0.0));
        let result = sweep.run(RunDescriptor { frequencies: &[], verbose: false, parallel: false });
        assert!(matches!(result, Err(Error::EmptySweep)));
        let result = run(sweep.segments(), sweep.termination(), &[]);
        assert!(matches!(result, Err(Error::EmptySweep)));
    }

    #[test]
    fn records_keep_input_order() {
        let sweep = rg303_sweep(10.0, Complex64::new(75.0, 10.0));
        let frequencies = [30e6, 1e6, 7e6, 144e6, 3.5e6];
        let result = sweep
            .run(RunDescriptor { frequencies: &frequencies, verbose: false, parallel: false })
            .unwrap();
        assert_eq!(result.frequencies().to_vec(), frequencies.to_vec());
    }

    #[test]
    fn parallel_run_matches_serial_run() {
        let sweep = rg303_sweep(17.0, Complex64::new(12.0, -80.0));
        let frequencies: Vec<f64> = (1..=200).map(|i| i as f64 * 0.5e6).collect();
        let serial = sweep
            .run(RunDescriptor { frequencies: &frequencies, verbose: false, parallel: false })
            .unwrap();
        let parallel = sweep
            .run(RunDescriptor { frequencies: &frequencies, verbose: false, parallel: true })
            .unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn bad_point_fails_the_sweep() {
        let sweep = rg303_sweep(10.0, Complex64::new(50.0, 0.0));
        let result = sweep.run(RunDescriptor {
            frequencies: &[1e6, -5.0, 2e6],
            verbose: false,
            parallel: true,
        });
        assert!(matches!(result, Err(Error::InvalidFrequency(f)) if f == -5.0));
    }

    #[test]
    fn varying_matched_load_never_reflects() {
        let line = LossModelLine::default();
        let z0_line = line.clone();
        let sweep = Sweep::new(SweepDescriptor {
            segments: vec![Segment::new(line, 25.0)],
            termination: Termination::new(
                crate::cascade::Load::varying(move |f| {
                    crate::line::LineSpec::from(z0_line.clone())
                        .characteristic_impedance(f)
                        .unwrap_or_default()
                }),
                50.0,
            ),
        })
        .unwrap();
        let result = run(sweep.segments(), sweep.termination(), &[1e6, 10e6, 100e6]).unwrap();
        for record in &result {
            let z0 = record.segments[0].z0;
            assert!((record.input_impedance - z0).norm() < 1e-10 * z0.norm());
            assert_relative_eq!(record.total_loss_db, record.matched_loss_db, max_relative = 1e-9);
        }
    }

    #[test]
    fn free_run_matches_sweep_run() {
        let sweep = rg303_sweep(40.0, Complex64::new(30.0, 45.0));
        let frequencies = [1.8e6, 3.5e6, 7e6, 14e6, 28e6];
        let expected = sweep
            .run(RunDescriptor { frequencies: &frequencies, verbose: false, parallel: true })
            .unwrap();
        let result = run(sweep.segments(), sweep.termination(), &frequencies).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn nominal_impedance_deviation_uses_five_percent() {
        let line = CoaxialLine::with_impedance(50.0, 1e-3, Dielectric::AIR);
        let segments = vec![
            Segment::new(CoaxialLine { nominal_impedance: Some(51.5), ..line.clone() }, 2.0),
            Segment::new(CoaxialLine { nominal_impedance: Some(54.0), ..line }, 2.0),
        ];
        let termination = Termination::new(Complex64::new(50.0, 0.0), 50.0);
        let result = run(&segments, &termination, &[100e6, 300e6, 1e9]).unwrap();

        assert_eq!(deviating_points(result.records(), 0, 51.5), 0);
        assert_eq!(deviating_points(result.records(), 1, 54.0), 3);
        assert_eq!(deviating_points(result.records(), 1, 50.0), 0);
    }

    #[test]
    fn no_segments_reflect_the_load_directly() {
        let load = Complex64::new(150.0, 0.0);
        let termination = Termination::new(load, 50.0);
        let result = run(&[], &termination, &[5e6]).unwrap();
        let record = &result.records()[0];
        assert_eq!(record.input_impedance, load);
        assert_relative_eq!(record.reflection_coefficient.re, 0.5, max_relative = 1e-12);
        assert_relative_eq!(record.vswr, 3.0, max_relative = 1e-12);
        assert_eq!(record.total_loss_db, 0.0);
        assert_eq!(record.matched_loss_db, 0.0);
    }
}
