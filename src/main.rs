use std::io::{self, BufRead};
use std::process::exit;

use vdrlog::{create, default_speed_table, Env, PosixEnv, DEFAULT_FILE_NAME, SHIP_NAME_SIZE};

const INFO_LOG_FILE_NAME: &str = "vdr_tool.log";

fn main() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("OPTIONS:");
    println!("1.- New Voyage Data Recorder File");
    if read_line(&mut lines).trim() == "1" {
        new_vdr_file(&mut lines);
    }
}

fn new_vdr_file(lines: &mut impl Iterator<Item = io::Result<String>>) {
    println!(">>> NEW VOYAGE DATA RECORDER FILE <<<");

    let ship_name = loop {
        println!("Enter the name of the ship (max. {SHIP_NAME_SIZE} characters):");
        let line = read_line(lines);
        let name = line.trim();
        if !name.is_empty() && name.len() <= SHIP_NAME_SIZE {
            break name.to_owned();
        }
    };

    let imo_number = loop {
        println!("Enter the ship's IMO Number:");
        match read_line(lines).trim().parse::<u32>() {
            Ok(number) if number > 0 => break number,
            _ => {}
        }
    };

    let env = PosixEnv::new();
    match create(
        &env,
        DEFAULT_FILE_NAME,
        &ship_name,
        imo_number,
        &default_speed_table(),
    ) {
        Ok(()) => {
            if let Ok(logger) = env.new_logger(INFO_LOG_FILE_NAME) {
                logger.log(&format!(
                    "created {DEFAULT_FILE_NAME} for {ship_name} (IMO {imo_number})"
                ));
            }
            println!("Wrote {DEFAULT_FILE_NAME}");
        }
        Err(error) => {
            eprintln!("failed to create {DEFAULT_FILE_NAME}: {error}");
            exit(1);
        }
    }
}

/// Next stdin line; end of input ends the session.
fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> String {
    match lines.next() {
        Some(Ok(line)) => line,
        _ => exit(0),
    }
}
