use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use studykit::quiz::{Difficulty, Question};
use studykit::quiz_service::QuizService;
use studykit::store::Store;

const SEED_DB_PATH: &str = "/tmp/studykit_seed.db";
const USER: &str = "alice";

fn main() {
    env_logger::init();

    let store = Arc::new(Store::new(SEED_DB_PATH).expect("Failed to create seed store"));
    let service = QuizService::new(store.clone());
    let mut rng = rand::thread_rng();

    // Source document
    let file_id = store
        .insert_file(
            USER,
            "alice/cell_biology.pdf",
            "cell_biology.pdf",
            "application/pdf",
            1_300_000,
            "The cell is the basic structural unit of all living organisms...",
        )
        .expect("Failed to insert file");

    // One quiz per difficulty, derived from the same document
    let quizzes = [
        ("Cell Structure Warmup", Difficulty::Easy),
        ("Organelles In Depth", Difficulty::Medium),
        ("Membrane Transport Challenge", Difficulty::Hard),
    ];

    for (title, difficulty) in quizzes {
        let questions = vec![
            Question::multiple_choice(
                "Which organelle produces most of the cell's ATP?",
                &["Nucleus", "Mitochondria", "Lysosome", "Ribosome"],
                "Mitochondria",
            ),
            Question::multiple_choice(
                "What controls what enters and leaves the cell?",
                &["Cell wall", "Cytoplasm", "Cell membrane", "Vacuole"],
                "Cell membrane",
            ),
            Question::true_false("Plant cells contain chloroplasts.", true),
            Question::true_false("Osmosis requires ATP.", false),
            Question::identification("Name the gel-like substance filling the cell.", "cytoplasm"),
        ];

        let quiz_id = store
            .insert_quiz(USER, Some(file_id), title, Some("Biology"), &difficulty, &questions)
            .expect("Failed to insert quiz");
        let quiz = store.get_quiz(quiz_id).expect("read quiz").expect("quiz exists");

        // A few attempts with jittered answer sheets and timings
        for _ in 0..3 {
            let mut answers: BTreeMap<usize, String> = BTreeMap::new();
            answers.insert(0, "Mitochondria".to_string());
            answers.insert(
                1,
                if rng.gen_bool(0.7) { "Cell membrane" } else { "Cytoplasm" }.to_string(),
            );
            answers.insert(2, "true".to_string());
            answers.insert(
                3,
                if rng.gen_bool(0.6) { "false" } else { "true" }.to_string(),
            );
            answers.insert(4, "cytoplasm".to_string());

            let time_taken = rng.gen_range(60.0..300.0);
            service
                .submit(USER, &quiz, &answers, time_taken)
                .expect("Failed to submit attempt");
        }
    }

    println!("Seed store created at {} with sample data", SEED_DB_PATH);
}
