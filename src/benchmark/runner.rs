//! Benchmark execution and result table.

use super::config::BenchmarkConfig;
use crate::error::KnapsackError;
use crate::instance::Instance;
use crate::solver::{Algorithm, SolverRunner};
use log::info;
use std::io::Write;
use std::sync::Arc;

/// Timings and values of one algorithm on one instance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkRecord {
    /// Caller-supplied instance name (usually the file name).
    pub label: String,
    pub capacity_weight: u64,
    pub capacity_volume: u64,
    pub num_items: usize,
    pub algorithm: Algorithm,

    /// Mean solve time in seconds over the completed runs.
    pub mean_time: f64,
    /// Sample standard deviation of the solve time, 0 with fewer than 2 runs.
    pub std_time: f64,
    /// Mean best value over the completed runs.
    pub mean_value: f64,
    /// Sample standard deviation of the best value.
    pub std_value: f64,

    /// Solve time of each completed run, in seconds.
    pub times: Vec<f64>,
    /// Best value of each completed run.
    pub values: Vec<u64>,

    /// Number of runs that completed.
    pub completed_runs: usize,
    /// Whether a run hit the time limit.
    pub timed_out: bool,
    /// Resource failure that stopped the runs, e.g. a refused DP table.
    pub failure: Option<String>,
}

impl BenchmarkRecord {
    fn new(label: &str, instance: &Instance, algorithm: Algorithm) -> Self {
        Self {
            label: label.to_string(),
            capacity_weight: instance.capacity_weight,
            capacity_volume: instance.capacity_volume,
            num_items: instance.num_items(),
            algorithm,
            mean_time: 0.0,
            std_time: 0.0,
            mean_value: 0.0,
            std_value: 0.0,
            times: Vec::new(),
            values: Vec::new(),
            completed_runs: 0,
            timed_out: false,
            failure: None,
        }
    }

    fn finish(mut self) -> Self {
        let values: Vec<f64> = self.values.iter().map(|&v| v as f64).collect();
        (self.mean_time, self.std_time) = mean_and_std(&self.times);
        (self.mean_value, self.std_value) = mean_and_std(&values);
        self.completed_runs = self.times.len();
        self
    }
}

/// Runs every configured algorithm on every instance, repeatedly.
///
/// # Usage
///
/// ```
/// use u_knapsack::benchmark::{BenchmarkConfig, BenchmarkRunner};
/// use u_knapsack::instance::Instance;
///
/// let instances = vec![(
///     "tiny".to_string(),
///     Instance::from_tuples(10, 10, &[(5, 5, 40), (4, 4, 30)]),
/// )];
/// let config = BenchmarkConfig::default().with_repetitions(2);
/// let records = BenchmarkRunner::run(&instances, &config).unwrap();
/// assert_eq!(records.len(), 3);
/// assert!(records.iter().all(|r| r.mean_value == 70.0));
/// ```
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Benchmarks labelled instances, returning one record per instance and
    /// algorithm in input order.
    ///
    /// Invalid instances or configuration abort the whole run. A timeout or
    /// a refused DP table only ends the repetitions of that pair.
    pub fn run(
        instances: &[(String, Instance)],
        config: &BenchmarkConfig,
    ) -> Result<Vec<BenchmarkRecord>, KnapsackError> {
        config.validate()?;
        for (_, instance) in instances {
            instance.validate()?;
        }

        #[cfg(feature = "parallel")]
        if config.parallel {
            use rayon::prelude::*;

            let per_instance: Vec<Vec<BenchmarkRecord>> = instances
                .par_iter()
                .map(|(label, instance)| Self::run_instance(label, instance, config))
                .collect::<Result<_, _>>()?;
            return Ok(per_instance.into_iter().flatten().collect());
        }

        let mut records = Vec::with_capacity(instances.len() * config.algorithms.len());
        for (label, instance) in instances {
            records.extend(Self::run_instance(label, instance, config)?);
        }
        Ok(records)
    }

    /// Benchmarks every configured algorithm on one instance.
    pub fn run_instance(
        label: &str,
        instance: &Instance,
        config: &BenchmarkConfig,
    ) -> Result<Vec<BenchmarkRecord>, KnapsackError> {
        let shared = Arc::new(instance.clone());
        config
            .algorithms
            .iter()
            .map(|&algorithm| Self::run_pair(label, &shared, algorithm, config))
            .collect()
    }

    fn run_pair(
        label: &str,
        instance: &Arc<Instance>,
        algorithm: Algorithm,
        config: &BenchmarkConfig,
    ) -> Result<BenchmarkRecord, KnapsackError> {
        let mut record = BenchmarkRecord::new(label, instance, algorithm);

        for _ in 0..config.repetitions {
            match SolverRunner::solve_shared(algorithm, Arc::clone(instance), &config.solve) {
                Ok(result) if result.completed => {
                    record.times.push(result.elapsed.as_secs_f64());
                    record.values.push(result.best_value);
                }
                Ok(_) => {
                    record.timed_out = true;
                    break;
                }
                Err(err @ KnapsackError::OutOfMemory { .. }) => {
                    record.failure = Some(err.to_string());
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        let record = record.finish();
        info!(
            "{label} n={} {algorithm}: {} runs, mean {:.6}s, value {:.0}{}",
            record.num_items,
            record.completed_runs,
            record.mean_time,
            record.mean_value,
            if record.timed_out { " (timed out)" } else { "" }
        );
        Ok(record)
    }
}

/// Writes records as a comma-separated table with a header row.
///
/// The last two columns list every completed run's time and value, as
/// `[a, b, ...]`. Fields holding a comma, quote or line break are quoted.
pub fn write_table<W: Write>(records: &[BenchmarkRecord], mut out: W) -> Result<(), KnapsackError> {
    writeln!(
        out,
        "label,capacity_weight,capacity_volume,num_items,algorithm,\
         mean_time,std_time,mean_value,std_value,completed_runs,timed_out,times,values"
    )?;
    for r in records {
        let times: Vec<String> = r.times.iter().map(|t| format!("{t:.7}")).collect();
        let values: Vec<String> = r.values.iter().map(u64::to_string).collect();
        writeln!(
            out,
            "{},{},{},{},{},{:.7},{:.7},{},{},{},{},{},{}",
            csv_field(&r.label),
            r.capacity_weight,
            r.capacity_volume,
            r.num_items,
            r.algorithm,
            r.mean_time,
            r.std_time,
            r.mean_value,
            r.std_value,
            r.completed_runs,
            r.timed_out,
            csv_field(&format!("[{}]", times.join(", "))),
            csv_field(&format!("[{}]", values.join(", "))),
        )?;
    }
    Ok(())
}

/// Quotes `field` when it would otherwise break the row, doubling inner quotes.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Mean and sample standard deviation. `(0, 0)` when empty; the deviation
/// is 0 with a single sample.
fn mean_and_std(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    if samples.len() < 2 {
        return (mean, 0.0);
    }
    let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dp::DpConfig;
    use crate::solver::SolveConfig;
    use std::time::Duration;

    fn scenario() -> Instance {
        Instance::from_tuples(10, 10, &[(5, 5, 40), (4, 4, 30), (6, 3, 50)])
    }

    #[test]
    fn test_mean_and_std() {
        assert_eq!(mean_and_std(&[]), (0.0, 0.0));
        assert_eq!(mean_and_std(&[3.0]), (3.0, 0.0));

        let (mean, std) = mean_and_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        // Sample (n - 1) deviation: sqrt(32 / 7)
        assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_benchmark_records_per_pair() {
        let instances = vec![
            ("a".to_string(), scenario()),
            ("b".to_string(), Instance::from_tuples(5, 5, &[(5, 5, 7)])),
        ];
        let config = BenchmarkConfig::default().with_repetitions(3);
        let records = BenchmarkRunner::run(&instances, &config).unwrap();

        assert_eq!(records.len(), 6);
        assert_eq!(records[0].label, "a");
        assert_eq!(records[0].algorithm, Algorithm::Dp);
        assert_eq!(records[3].label, "b");
        for record in &records {
            assert_eq!(record.completed_runs, 3);
            assert_eq!(record.times.len(), 3);
            assert_eq!(record.std_value, 0.0);
            assert!(!record.timed_out);
            assert!(record.failure.is_none());
        }
        assert_eq!(records[0].mean_value, 80.0);
        assert_eq!(records[5].mean_value, 7.0);
    }

    #[test]
    fn test_benchmark_stops_after_timeout() {
        let items: Vec<(u64, u64, u64)> = (0..40).map(|i| (1, 1, 10 + i)).collect();
        let instances = vec![("wide".to_string(), Instance::from_tuples(100, 100, &items))];
        let config = BenchmarkConfig::default()
            .with_repetitions(5)
            .with_timeout(Duration::from_millis(200))
            .with_algorithms(vec![Algorithm::Backtracking]);

        let records = BenchmarkRunner::run(&instances, &config).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].timed_out);
        assert_eq!(records[0].completed_runs, 0);
        assert_eq!(records[0].mean_time, 0.0);
    }

    #[test]
    fn test_benchmark_records_out_of_memory() {
        let instances = vec![("big".to_string(), scenario())];
        let config = BenchmarkConfig::default()
            .with_repetitions(2)
            .with_algorithms(vec![Algorithm::Dp])
            .with_solve_config(SolveConfig::default().with_dp(DpConfig::default().with_max_cells(10)));

        let records = BenchmarkRunner::run(&instances, &config).unwrap();
        assert!(records[0].failure.is_some());
        assert!(!records[0].timed_out);
        assert_eq!(records[0].completed_runs, 0);
    }

    #[test]
    fn test_benchmark_rejects_invalid_instance() {
        let bad = Instance::from_tuples(1, 1, &[(1, 1, u64::MAX), (1, 1, 1)]);
        let instances = vec![("bad".to_string(), bad)];
        let err = BenchmarkRunner::run(&instances, &BenchmarkConfig::default()).unwrap_err();
        assert!(matches!(err, KnapsackError::InvalidInstance(_)));
    }

    #[test]
    fn test_write_table() {
        let instances = vec![("s".to_string(), scenario())];
        let config = BenchmarkConfig::default()
            .with_repetitions(1)
            .with_algorithms(vec![Algorithm::BranchAndBound]);
        let records = BenchmarkRunner::run(&instances, &config).unwrap();

        let mut out = Vec::new();
        write_table(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("label,capacity_weight"));
        assert!(lines[0].ends_with(",timed_out,times,values"));
        assert!(lines[1].starts_with("s,10,10,3,branch_and_bound,"));
        // One run: the lists hold no comma and stay unquoted.
        assert!(lines[1].contains(",80,0,1,false,["));
        assert!(lines[1].ends_with("],[80]"));
    }

    #[test]
    fn test_write_table_quotes_label_and_lists_runs() {
        let instances = vec![("dir,a \"x\"\nnext".to_string(), scenario())];
        let config = BenchmarkConfig::default()
            .with_repetitions(2)
            .with_algorithms(vec![Algorithm::Dp]);
        let records = BenchmarkRunner::run(&instances, &config).unwrap();

        let mut out = Vec::new();
        write_table(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("\n\"dir,a \"\"x\"\"\nnext\",10,10,3,dp,"));
        assert!(text.ends_with(",\"[80, 80]\"\n"));
    }

    #[test]
    fn test_csv_field() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let instances: Vec<(String, Instance)> = (0..4)
            .map(|i| (format!("i{i}"), Instance::from_tuples(10 + i, 10, &[(5, 5, 40), (4, 4, 30), (6, 3, 50)])))
            .collect();
        let sequential = BenchmarkConfig::default().with_repetitions(1);
        let parallel = sequential.clone().with_parallel(true);

        let a = BenchmarkRunner::run(&instances, &sequential).unwrap();
        let b = BenchmarkRunner::run(&instances, &parallel).unwrap();
        let summary = |records: &[BenchmarkRecord]| {
            records
                .iter()
                .map(|r| (r.label.clone(), r.algorithm, r.values.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(summary(&a), summary(&b));
    }
}
