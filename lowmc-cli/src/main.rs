extern crate env_logger;
#[macro_use]
extern crate log;
extern crate lowmc;
extern crate structopt;
#[macro_use]
extern crate structopt_derive;

pub mod options;

use lowmc::cipher;
use lowmc::codec;
use lowmc::{Params, SecurityLevel};
use options::LowMcOptions;
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

fn main() {
    env_logger::init();

    let exit_code = match LowMcOptions::from_args() {
        LowMcOptions::Generate { param, out_dir } => run_generate(&param, out_dir),
        LowMcOptions::SelfTest => run_self_test(),
    };
    process::exit(exit_code);
}

fn run_generate(param: &str, out_dir: Option<PathBuf>) -> i32 {
    let level = match SecurityLevel::from_tag(param) {
        Ok(level) => level,
        Err(e) => {
            error!("{e}");
            println!("Unrecognised parameter. Expected one of: picnic-L1, picnic-L3, picnic-L5.");
            return 1;
        }
    };
    info!("generating constants for {level}");

    let params = level.params();
    let mut gen = lowmc::bitstream::GrainSsg::new();
    let constants = lowmc::constants::generate(&params, &mut gen);

    let file_name = format!("{}.dat", level.tag());
    let path = out_dir.map_or_else(|| PathBuf::from(&file_name), |dir| dir.join(&file_name));

    if let Err(e) = codec::write(&path, &params, &constants) {
        error!("failed to write {}: {e}", path.display());
        return 1;
    }
    info!("wrote {}", path.display());
    0
}

struct Vector {
    level: SecurityLevel,
    key_prefix: &'static [u8],
    plain_prefix: &'static [u8],
    expected: &'static [u8],
}

const VECTORS: &[Vector] = &[
    Vector {
        level: SecurityLevel::L1,
        key_prefix: &[0x80],
        plain_prefix: &[0xAB, 0xFF],
        expected: &[
            0x0E, 0x30, 0x72, 0x0B, 0x9F, 0x64, 0xD5, 0xC2, 0xA7, 0x77, 0x1C, 0x8C, 0x23, 0x8D,
            0x8F, 0x70,
        ],
    },
    Vector {
        level: SecurityLevel::L1,
        key_prefix: &[0xB5, 0xDF, 0x53, 0x7B],
        plain_prefix: &[0xF7, 0x7D, 0xB5, 0x7B],
        expected: &[
            0x0E, 0x59, 0x61, 0xE9, 0x99, 0x21, 0x53, 0xB1, 0x32, 0x45, 0xAF, 0x24, 0x3D, 0xD7,
            0xDD, 0xC0,
        ],
    },
    Vector {
        level: SecurityLevel::L1,
        key_prefix: &[0x08, 0x4C, 0x2A, 0x6E, 0x19, 0x5D, 0x3B, 0x7F],
        plain_prefix: &[0xF7, 0xB3, 0xD5, 0x91, 0xE6, 0xA2, 0xC4, 0x80],
        expected: &[
            0x91, 0x5C, 0x63, 0x21, 0xD7, 0x86, 0x46, 0xB6, 0xC7, 0x65, 0x43, 0xFF, 0xB8, 0x52,
            0x3B, 0x4D,
        ],
    },
    Vector {
        level: SecurityLevel::L3,
        key_prefix: &[0x80],
        plain_prefix: &[0xAB, 0xFF],
        expected: &[
            0xA8, 0x5B, 0x82, 0x44, 0x34, 0x4A, 0x2E, 0x1B, 0x10, 0xA1, 0x7B, 0xAB, 0x04, 0x30,
            0x73, 0xF6, 0xBB, 0x64, 0x9A, 0xE6, 0xAF, 0x65, 0x9F, 0x6F,
        ],
    },
    Vector {
        level: SecurityLevel::L5,
        key_prefix: &[0x80],
        plain_prefix: &[0xAB, 0xFF],
        expected: &[
            0xB8, 0xF2, 0x0A, 0x88, 0x8A, 0x0A, 0x9E, 0xC4, 0xE4, 0x95, 0xF1, 0xFB, 0x43, 0x9A,
            0xBD, 0xDE, 0x18, 0xC1, 0xD3, 0xD2, 0x9C, 0xF2, 0x0D, 0xF4, 0xB1, 0x0A, 0x56, 0x7A,
            0xA0, 0x2C, 0x72, 0x67,
        ],
    },
    Vector {
        level: SecurityLevel::L5,
        key_prefix: &[0xB5, 0xDF, 0x53, 0x7B],
        plain_prefix: &[0xF7, 0x7D, 0xB5, 0x7B],
        expected: &[
            0xEE, 0xEC, 0xCE, 0x6A, 0x58, 0x4A, 0x93, 0x30, 0x6D, 0xAE, 0xA0, 0x75, 0x19, 0xB4,
            0x7A, 0xD6, 0x40, 0x2C, 0x11, 0xDD, 0x94, 0x2A, 0xA3, 0x16, 0x65, 0x41, 0x44, 0x49,
            0x77, 0xA2, 0x14, 0xC5,
        ],
    },
];

fn padded(prefix: &[u8], total_bytes: usize) -> Vec<u8> {
    let mut block = vec![0u8; total_bytes];
    block[..prefix.len()].copy_from_slice(prefix);
    block
}

fn run_self_test() -> i32 {
    let mut all_passed = true;
    let mut instances: Vec<(SecurityLevel, Option<lowmc::LowMc>)> = vec![
        (SecurityLevel::L1, None),
        (SecurityLevel::L3, None),
        (SecurityLevel::L5, None),
    ];

    for vector in VECTORS {
        let params: Params = vector.level.params();
        let slot = instances
            .iter_mut()
            .find(|(level, _)| *level == vector.level)
            .unwrap();
        if slot.1.is_none() {
            info!("generating a fresh {} instance for the self-test", vector.level);
            slot.1 = Some(cipher::new_instance(vector.level));
        }
        let lowmc = slot.1.as_mut().unwrap();

        let key = padded(vector.key_prefix, params.keysize / 8);
        let plaintext = padded(vector.plain_prefix, params.blocksize / 8);
        lowmc.set_key(&key).expect("key length matches params by construction");

        let passed = match lowmc.encrypt(&plaintext) {
            Ok(ciphertext) => {
                let decrypt_ok = lowmc.decrypt(&ciphertext).map(|p| p == plaintext).unwrap_or(false);
                ciphertext == vector.expected && decrypt_ok
            }
            Err(e) => {
                error!("encrypt failed for {}: {e}", vector.level);
                false
            }
        };

        println!(
            "{}: {}",
            vector.level,
            if passed { "PASS" } else { "FAIL" }
        );
        all_passed &= passed;
    }

    if all_passed {
        0
    } else {
        1
    }
}
