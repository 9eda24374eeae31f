use costwatch_core::CostRecord;

const MOCK_DATA: &[(&str, &str, f64)] = &[
    ("2025-08-01T00:00:00.000Z", "EC2", 12.34),
    ("2025-08-01T01:00:00.000Z", "S3", 2.50),
    ("2025-08-01T02:00:00.000Z", "Lambda", 0.75),
    ("2025-08-01T03:00:00.000Z", "EC2", 13.10),
    ("2025-08-01T04:00:00.000Z", "S3", 2.60),
    ("2025-08-01T05:00:00.000Z", "Lambda", 0.80),
    ("2025-08-01T06:00:00.000Z", "EC2", 14.00),
    ("2025-08-01T07:00:00.000Z", "S3", 2.70),
    ("2025-08-01T08:00:00.000Z", "Lambda", 0.85),
    ("2025-08-01T09:00:00.000Z", "EC2", 15.00),
];

/// The fixed demo dataset restored by a reset.
pub fn mock_records() -> Vec<CostRecord> {
    MOCK_DATA
        .iter()
        .map(|(timestamp, service, cost)| CostRecord {
            timestamp: timestamp.to_string(),
            service: service.to_string(),
            cost: *cost,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use costwatch_core::normalize_timestamp;

    #[test]
    fn mock_timestamps_are_canonical() {
        for record in mock_records() {
            assert_eq!(
                normalize_timestamp(&record.timestamp).as_deref(),
                Some(record.timestamp.as_str())
            );
            assert!(record.cost >= 0.0);
        }
    }
}
