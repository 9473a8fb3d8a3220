//! Telemetry CSV builders.
//!
//! Cells are kept as strings so tests can inject blanks and garbage exactly
//! as a game client might emit them.

/// Required columns, in the order the builder writes them.
pub const REQUIRED_HEADER: &[&str] = &[
    "session_id",
    "level_id",
    "attempt_number_in_session",
    "level_outcome",
    "level_duration_ms",
    "total_kill_attempts",
    "correct_kills",
    "wrong_kills",
    "avg_speed",
    "mean_reaction_latency_ms",
];

/// One level attempt row.
#[derive(Debug, Clone, Default)]
pub struct Attempt {
    pub session_id: String,
    pub level_id: String,
    pub attempt_number: String,
    pub outcome: String,
    pub duration_ms: String,
    pub kill_attempts: String,
    pub correct_kills: String,
    pub wrong_kills: String,
    pub avg_speed: String,
    pub latency_ms: String,
    pub timestamp: String,
    pub retry_after_failure: String,
}

impl Attempt {
    /// A plausible successful attempt: 10 kill attempts, 8 correct, speed 6,
    /// 900 ms latency.
    pub fn new(session: &str, level: &str, attempt: u32) -> Self {
        Self {
            session_id: session.to_string(),
            level_id: level.to_string(),
            attempt_number: attempt.to_string(),
            outcome: "success".to_string(),
            duration_ms: "42000".to_string(),
            kill_attempts: "10".to_string(),
            correct_kills: "8".to_string(),
            wrong_kills: "2".to_string(),
            avg_speed: "6".to_string(),
            latency_ms: "900".to_string(),
            ..Default::default()
        }
    }

    pub fn outcome(mut self, outcome: &str) -> Self {
        self.outcome = outcome.to_string();
        self
    }

    pub fn speed(mut self, speed: &str) -> Self {
        self.avg_speed = speed.to_string();
        self
    }

    pub fn latency_ms(mut self, latency: &str) -> Self {
        self.latency_ms = latency.to_string();
        self
    }

    pub fn kills(mut self, attempts: &str, correct: &str) -> Self {
        self.kill_attempts = attempts.to_string();
        self.correct_kills = correct.to_string();
        self
    }

    pub fn timestamp(mut self, ts: &str) -> Self {
        self.timestamp = ts.to_string();
        self
    }

    pub fn retry_flag(mut self, flag: &str) -> Self {
        self.retry_after_failure = flag.to_string();
        self
    }

    fn cells(&self) -> Vec<&str> {
        vec![
            self.session_id.as_str(),
            self.level_id.as_str(),
            self.attempt_number.as_str(),
            self.outcome.as_str(),
            self.duration_ms.as_str(),
            self.kill_attempts.as_str(),
            self.correct_kills.as_str(),
            self.wrong_kills.as_str(),
            self.avg_speed.as_str(),
            self.latency_ms.as_str(),
        ]
    }
}

/// A telemetry CSV under construction.
#[derive(Debug, Clone, Default)]
pub struct TelemetryCsv {
    rows: Vec<Attempt>,
    with_timestamp: bool,
    with_retry_flag: bool,
    omit: Vec<String>,
}

impl TelemetryCsv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, attempt: Attempt) -> Self {
        self.rows.push(attempt);
        self
    }

    /// Add a `timestamp` column.
    pub fn with_timestamp(mut self) -> Self {
        self.with_timestamp = true;
        self
    }

    /// Add a `retry_after_failure` column.
    pub fn with_retry_flag(mut self) -> Self {
        self.with_retry_flag = true;
        self
    }

    /// Drop a required column from the output, to provoke schema errors.
    pub fn without_column(mut self, name: &str) -> Self {
        self.omit.push(name.to_string());
        self
    }

    pub fn render(&self) -> String {
        let mut header: Vec<&str> = REQUIRED_HEADER.to_vec();
        if self.with_timestamp {
            header.push("timestamp");
        }
        if self.with_retry_flag {
            header.push("retry_after_failure");
        }
        let keep: Vec<bool> = header
            .iter()
            .map(|h| !self.omit.iter().any(|o| o == h))
            .collect();

        let mut writer = csv::Writer::from_writer(vec![]);
        let pick = |cells: Vec<&str>| -> Vec<String> {
            cells
                .into_iter()
                .zip(&keep)
                .filter(|(_, k)| **k)
                .map(|(c, _)| c.to_string())
                .collect()
        };
        writer
            .write_record(pick(header.clone()))
            .expect("Failed to write header");
        for row in &self.rows {
            let mut cells = row.cells();
            if self.with_timestamp {
                cells.push(&row.timestamp);
            }
            if self.with_retry_flag {
                cells.push(&row.retry_after_failure);
            }
            writer.write_record(pick(cells)).expect("Failed to write row");
        }
        let bytes = writer.into_inner().expect("Failed to flush csv");
        String::from_utf8(bytes).expect("csv is utf-8")
    }

    /// Two levels, three sessions, one failure followed by a retry.
    ///
    /// Level `1`: s1 fails then succeeds on attempt 2; s2 succeeds.
    /// Level `2`: s1 fails and stops; s3 succeeds.
    pub fn sample() -> Self {
        Self::new()
            .with_timestamp()
            .row(
                Attempt::new("s1", "1", 1)
                    .outcome("fail")
                    .speed("3")
                    .timestamp("2024-05-01 10:00:00"),
            )
            .row(
                Attempt::new("s1", "1", 2)
                    .speed("6")
                    .timestamp("2024-05-01 10:02:00"),
            )
            .row(
                Attempt::new("s2", "1", 1)
                    .speed("9")
                    .latency_ms("45000")
                    .timestamp("2024-05-01 11:00:00"),
            )
            .row(
                Attempt::new("s1", "2", 3)
                    .outcome("fail")
                    .speed("12")
                    .kills("0", "0")
                    .timestamp("2024-05-01 10:05:00"),
            )
            .row(
                Attempt::new("s3", "2", 1)
                    .speed("6")
                    .kills("4", "3")
                    .timestamp("not a date"),
            )
    }
}
