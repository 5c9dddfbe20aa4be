//! Built-in topic banks. A minimal slice of the real content that keeps
//! the app useful when no bank directory is configured, and gives the
//! tests realistic data to chew on.

use crate::domain::{
  BlankItem, Exercise, ExerciseKind, MatchPair, Question, Subtopic, TopicBank,
};

fn q(id: u32, qtype: &str, subtopic: &str, word: &str, english: &str, answer: &str, explanation: &str) -> Question {
  Question {
    id,
    qtype: qtype.into(),
    subtopic: subtopic.into(),
    word: word.into(),
    sentence: String::new(),
    question: String::new(),
    english: english.into(),
    context: String::new(),
    rule: String::new(),
    answer: answer.into(),
    options: None,
    explanation: explanation.into(),
  }
}

/// Minimal set of built-in banks that guarantee the app is useful even
/// without an external bank directory.
pub fn seed_banks() -> Vec<TopicBank> {
  vec![partitive_bank(), imperative_bank(), existential_bank()]
}

fn partitive_bank() -> TopicBank {
  TopicBank {
    topic: "partitive".into(),
    title: "Partitiivi".into(),
    description: "Finnish partitive case".into(),
    questions: vec![
      q(1, "partitive", "food", "leipä", "bread", "leipää", "leipä → leipää (ä-harmony)"),
      q(2, "partitive", "food", "maito", "milk", "maitoa", "maito → maitoa"),
      q(3, "partitive", "food", "kala", "fish", "kalaa", "kala → kalaa"),
      q(4, "partitive", "food", "vesi", "water", "vettä", "vesi → vettä (consonant change)"),
      q(5, "partitive", "people", "nainen", "woman", "naista", "-nen words: nainen → naista"),
      q(6, "partitive", "people", "mies", "man", "miestä", "mies → miestä"),
    ],
    question_sets: Vec::new(),
    subtopics: vec![
      Subtopic { id: "food".into(), name: "Ruoka".into(), icon: "🍞".into() },
      Subtopic { id: "people".into(), name: "Ihmiset".into(), icon: "👥".into() },
    ],
  }
}

fn imperative_bank() -> TopicBank {
  TopicBank {
    topic: "imperative".into(),
    title: "Imperatiivi".into(),
    description: "Finnish imperative mood".into(),
    questions: vec![
      q(1, "write", "positive", "mennä", "Go! (sg)", "mene", "mennä → mene"),
      q(2, "write", "positive", "syödä", "Eat! (sg)", "syö", "syödä → syö"),
      q(3, "write", "positive", "tulla", "Come! (sg)", "tule", "tulla → tule"),
      q(4, "write", "negative", "mennä", "Don't go! (sg)", "älä mene", "negative: älä + stem"),
      q(5, "write", "negative", "huutaa", "Don't shout! (sg)", "älä huuda", "negative: älä + stem"),
    ],
    question_sets: vec![
      Exercise {
        id: "imp-match".into(),
        title: "Yhdistä käskyt".into(),
        instructions_fi: "Yhdistä suomenkielinen käsky englanninkieliseen.".into(),
        instructions_en: "Match each Finnish command to its English meaning.".into(),
        kind: ExerciseKind::DragMatch {
          items: vec![
            MatchPair { id: 1, left: "Mene kotiin!".into(), right: "Go home!".into() },
            MatchPair { id: 2, left: "Älä huuda!".into(), right: "Don't shout!".into() },
            MatchPair { id: 3, left: "Istu alas!".into(), right: "Sit down!".into() },
            MatchPair { id: 4, left: "Odota hetki!".into(), right: "Wait a moment!".into() },
          ],
        },
      },
      Exercise {
        id: "imp-identify".into(),
        title: "Tunnista imperatiivit".into(),
        instructions_fi: "Klikkaa kaikkia imperatiivimuotoja.".into(),
        instructions_en: "Click every imperative form in the text.".into(),
        kind: ExerciseKind::ClickToIdentify {
          text: "Mene kauppaan ja osta maitoa. Älä unohda lompakkoa! Kissa nukkuu sohvalla.".into(),
          targets: vec!["mene".into(), "osta".into(), "älä".into(), "unohda".into()],
          negatives: vec!["nukkuu".into()],
        },
      },
      Exercise {
        id: "imp-write".into(),
        title: "Täydennä käskyt".into(),
        instructions_fi: "Kirjoita verbi imperatiivissa.".into(),
        instructions_en: "Fill in the imperative form.".into(),
        kind: ExerciseKind::FillBlanks {
          items: vec![
            BlankItem {
              number: 1,
              prompt: "___ ovi! (avata)".into(),
              hint: "ava...".into(),
              answers: vec!["avaa".into()],
            },
            BlankItem {
              number: 2,
              prompt: "___ ___ ulos! (mennä, kielteinen)".into(),
              hint: "älä/".into(),
              answers: vec!["älä".into(), "mene".into()],
            },
          ],
        },
      },
    ],
    subtopics: vec![
      Subtopic { id: "positive".into(), name: "Myönteinen".into(), icon: "✅".into() },
      Subtopic { id: "negative".into(), name: "Kielteinen".into(), icon: "🚫".into() },
    ],
  }
}

fn existential_bank() -> TopicBank {
  let questions = vec![
    q(1, "identify", "existence", "", "Is this an existential sentence: 'Pöydällä on kirja.'?", "yes",
      "Place + on + subject is the existential pattern."),
    q(2, "identify", "existence", "", "Is this an existential sentence: 'Kirja on pöydällä.'?", "no",
      "Subject-first sentences state location, not existence."),
    q(3, "sentence", "structure", "", "'In the room there is a cat' in Finnish", "huoneessa on kissa",
      "Existential order: place, on, subject."),
  ];
  TopicBank {
    topic: "existential".into(),
    title: "Eksistentiaalilauseet".into(),
    description: "There is / there are sentences".into(),
    questions,
    question_sets: Vec::new(),
    subtopics: vec![
      Subtopic { id: "existence".into(), name: "Tunnistus".into(), icon: "🔍".into() },
      Subtopic { id: "structure".into(), name: "Rakenne".into(), icon: "🧱".into() },
    ],
  }
}
