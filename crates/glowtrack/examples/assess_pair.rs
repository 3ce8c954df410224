use chrono::NaiveDate;
use glowtrack::{OutcomeAssessor, TreatmentContext};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        eprintln!(
            "Usage: {} <before.jpg> <after.jpg> <treatment_date> <photo_date> [treatment] [out.json]",
            args[0]
        );
        std::process::exit(2);
    }

    let before = image::open(&args[1])?.to_rgb8();
    let after = image::open(&args[2])?.to_rgb8();
    let treatment_date: NaiveDate = args[3].parse()?;
    let photo_date: NaiveDate = args[4].parse()?;
    let treatment = args.get(5).map(String::as_str).unwrap_or("treatment");

    let assessor = OutcomeAssessor::new();
    let context = TreatmentContext::new(treatment_date, photo_date, treatment);
    let assessment = assessor.assess(&before, &after, &context)?;

    println!(
        "Overall score {:.1}/10 ({} of 4 dimensions measured).",
        assessment.comparison.overall_score,
        assessment.comparison.n_measured()
    );
    println!(
        "Effect {}, visibility {}, {} risk(s).",
        assessment.evaluation.effect_level,
        assessment.evaluation.visibility.code(),
        assessment.evaluation.risks.len()
    );

    if let Some(out_path) = args.get(6) {
        let json = serde_json::to_string_pretty(&assessment)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
