/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Three digit display for counters, saturating at 999.
pub(crate) fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_zero_padded_and_saturates() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(999), "999");
        assert_eq!(format_for_counter(12345), "999");
    }
}
