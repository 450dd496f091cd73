use chrono::NaiveDate;
use daxie::{decode, encode, round_half_to_even, totals, InterestCalculator};

fn main() {
    println!("=== Capitalized Numeral Demo ===\n");

    let amounts = [
        "7", "1024", "100000001", "123456789.25", "0.5", "-8.05", "1000000000000",
    ];

    for amount in &amounts {
        match encode(amount) {
            Ok(text) => {
                print!("  {amount:>16} -> {text}");
                match decode(&text) {
                    Ok(back) if back == *amount => println!("  (round trip ok)"),
                    Ok(back) => println!("  (decoded back as {back})"),
                    Err(e) => println!("  decode error: {e}"),
                }
            }
            Err(e) => println!("  {amount:>16} -> encode error: {e}"),
        }
    }

    println!("\n=== Banker's Rounding ===\n");
    for (value, scale) in [("0.125", 2), ("0.135", 2), ("2.5", 0), ("3.5", 0)] {
        match round_half_to_even(value, scale) {
            Ok(rounded) => println!("  {value:>6} @ scale {scale} -> {rounded}"),
            Err(e) => println!("  {value:>6} -> {e}"),
        }
    }

    println!("\n=== Annuity Schedule: 1200 at 12% over 3 months ===\n");
    let start = NaiveDate::from_ymd_opt(2019, 6, 8)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid demo date");
    let calc = InterestCalculator::new(start);
    match calc.equal_installment(1200.0, 0.12, 3) {
        Ok(rows) => {
            for (i, row) in rows.iter().enumerate() {
                println!(
                    "  #{:<2} due {}  principal {:>8}  interest {:>6}  payment {:>8}",
                    i + 1,
                    row.due_at.date(),
                    row.principal.to_string(),
                    row.interest.to_string(),
                    row.total.to_string(),
                );
                if let Ok(text) = encode(&row.total.to_string()) {
                    println!("      on the check: {text}");
                }
            }
            let sums = totals(&rows);
            println!(
                "  totals: principal {}  interest {}  paid {}",
                sums.principal, sums.interest, sums.total
            );
        }
        Err(e) => println!("  schedule error: {e}"),
    }

    println!("\n=== Demo Complete ===");
}
