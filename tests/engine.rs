use cardcrc::*;

/// Deterministic pseudo random bytes
fn sample(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

fn bitwise_modbus(data: &[u8]) -> u16 {
    // Modbus parameters with the MSB-first loop, bypassing the fast path
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= (reflect8(byte) as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x8005
            } else {
                crc << 1
            };
        }
    }
    reflect16(crc)
}

#[test]
fn fast_and_general_modbus_agree() {
    for len in 0..=32 {
        for seed in 0..8 {
            let data = sample(len, seed);
            let fast = crc16_modbus(&data);
            assert_eq!(fast, bitwise_modbus(&data), "len {len} seed {seed}");
            assert_eq!(fast, compute(&data, &CrcParameters::MODBUS));
        }
    }
}

#[test]
fn modbus_params_built_by_hand() {
    let params = CrcParameters::new(0x8005, 0xFFFF, true, true, 0x0000);
    for len in 0..=32 {
        let data = sample(len, 42);
        assert_eq!(compute(&data, &params), crc16_modbus(&data));
    }
}

#[test]
fn deterministic() {
    let data = sample(32, 3);
    for preset in Preset::ALL {
        let params = preset.params();
        assert_eq!(compute(&data, &params), compute(&data, &params));
    }
}

#[test]
fn zero_length_identity() {
    let mut presets: Vec<CrcParameters> = Preset::ALL.iter().map(|p| p.params()).collect();
    presets.push(CrcParameters::new(0x1021, 0x1234, false, true, 0x00FF));
    presets.push(CrcParameters::new(0x8005, 0xA5A5, true, false, 0xFFFF));
    for params in presets {
        let register = if params.reflect_output {
            reflect16(params.initial_value)
        } else {
            params.initial_value
        };
        assert_eq!(compute(&[], &params), params.xor_out ^ register, "{params:?}");
    }
}

#[test]
fn known_vectors() {
    let check = b"123456789";
    assert_eq!(compute(check, &Preset::Xmodem.params()), 0x31C3);
    assert_eq!(compute(check, &Preset::Ccitt.params()), 0x29B1);
    assert_eq!(compute(check, &Preset::Kermit.params()), 0x2189);
    assert_eq!(compute(check, &Preset::Modbus.params()), 0x4B37);
    assert_eq!(compute(&[], &Preset::Modbus.params()), 0xFFFF);
}

#[test]
fn xor_out_applied_after_reflection() {
    let data = sample(14, 9);
    let plain = CrcParameters::new(0x1021, 0x0000, true, true, 0x0000);
    let xored = CrcParameters::new(0x1021, 0x0000, true, true, 0xFFFF);
    assert_eq!(compute(&data, &xored), !compute(&data, &plain));
}

#[test]
fn variants_over_scenario_body() {
    let body = hex::decode("3000100000000000000000590406").unwrap();
    let reports = compare_variants(&body).unwrap();
    assert_eq!(reports.len(), Preset::ALL.len());
    assert_eq!(reports[0].crc, crc16_modbus(&body));
    for report in &reports {
        assert_eq!(report.crc, compute(&body, &report.preset.params()));
        assert_eq!(
            u16::from_le_bytes(report.transmission_order()),
            report.crc
        );
    }
}
