use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use ndarray::Array1;

use wernicke::{
    Encoder, EntityLabel, IntentDecision, NluConfig, NluError, ResolutionResult, Resolver,
    TokenTagger,
};

/// Encoder returning scripted vectors keyed by input text; anything not in
/// the table embeds to the zero vector and therefore scores 0 everywhere.
struct TableEncoder {
    dimension: usize,
    table: HashMap<String, Vec<f32>>,
}

impl TableEncoder {
    fn new(dimension: usize, entries: Vec<(&str, Vec<f32>)>) -> Self {
        Self {
            dimension,
            table: entries
                .into_iter()
                .map(|(text, values)| (text.to_string(), values))
                .collect(),
        }
    }
}

impl Encoder for TableEncoder {
    fn encode(&self, text: &str) -> wernicke::Result<Array1<f32>> {
        let values = self
            .table
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.dimension]);
        Ok(Array1::from_vec(values))
    }
}

/// Tagger returning scripted per-token scores keyed by the joined tokens.
#[derive(Default)]
struct TableTagger {
    table: HashMap<String, HashMap<EntityLabel, Vec<f32>>>,
}

impl TableTagger {
    fn new(entries: Vec<(&str, Vec<(&str, Vec<f32>)>)>) -> Self {
        Self {
            table: entries
                .into_iter()
                .map(|(text, rows)| {
                    (
                        text.to_string(),
                        rows.into_iter()
                            .map(|(entity, scores)| (EntityLabel::from(entity), scores))
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

impl TokenTagger for TableTagger {
    fn tag_tokens(&self, tokens: &[String]) -> wernicke::Result<HashMap<EntityLabel, Vec<f32>>> {
        Ok(self
            .table
            .get(&tokens.join(" "))
            .cloned()
            .unwrap_or_default())
    }
}

fn airline_config() -> NluConfig {
    NluConfig {
        intents: vec![
            "flight".into(),
            "airfare".into(),
            "ground_service and ground_fare".into(),
        ],
        entities: vec![
            "city_name".into(),
            "flight_mod".into(),
            "time_relative".into(),
        ],
        embedding_dimension: 3,
        ..NluConfig::default()
    }
}

fn airline_encoder(extra: Vec<(&str, Vec<f32>)>) -> TableEncoder {
    let mut entries = vec![
        ("flight", vec![1.0, 0.0, 0.0]),
        ("airfare", vec![0.0, 1.0, 0.0]),
        ("ground_service and ground_fare", vec![0.0, 0.0, 1.0]),
    ];
    entries.extend(extra);
    TableEncoder::new(3, entries)
}

fn build_resolver(encoder: TableEncoder, tagger: TableTagger) -> Resolver {
    Resolver::builder()
        .with_config(airline_config())
        .with_encoder(Arc::new(encoder))
        .with_tagger(Arc::new(tagger))
        .build()
        .expect("Failed to build resolver")
}

#[test]
fn test_end_to_end_single_intent_with_entities() -> Result<(), Box<dyn std::error::Error>> {
    let encoder = airline_encoder(vec![(
        "show me cheapest flights to boston",
        vec![0.92, 0.55, 0.1],
    )]);
    let tagger = TableTagger::new(vec![(
        "show me cheapest flights to boston",
        vec![
            ("city_name", vec![0.0, 0.0, 0.1, 0.0, 0.0, 0.98]),
            ("flight_mod", vec![0.0, 0.0, 0.9, 0.0, 0.0, 0.0]),
        ],
    )]);
    let resolver = build_resolver(encoder, tagger);

    let result = resolver.resolve("show me cheapest flights to boston", "utt-1")?;

    assert_eq!(
        result.intent,
        IntentDecision::Single {
            intent: "flight".into(),
            score: 0.92
        }
    );
    assert_eq!(result.entities.len(), 2);
    // Catalog order: city_name first, then flight_mod.
    assert_eq!(result.entities[0].entity.name(), "city_name");
    assert_eq!((result.entities[0].start, result.entities[0].end), (5, 5));
    assert_eq!(result.entities[1].entity.name(), "flight_mod");
    assert_eq!((result.entities[1].start, result.entities[1].end), (2, 2));
    Ok(())
}

#[test]
fn test_end_to_end_ambiguous_decision() -> Result<(), Box<dyn std::error::Error>> {
    let encoder = airline_encoder(vec![("how much to fly there", vec![0.85, 0.70, 0.0])]);
    let resolver = build_resolver(encoder, TableTagger::default());

    let result = resolver.resolve("how much to fly there", "utt-2")?;

    match result.intent {
        IntentDecision::Ambiguous { candidates } => {
            assert_eq!(candidates.len(), 2);
            assert_eq!(candidates[0].intent, "flight");
            assert_eq!(candidates[1].intent, "airfare");
        }
        other => panic!("expected ambiguous decision, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_end_to_end_compound_decision() -> Result<(), Box<dyn std::error::Error>> {
    let encoder = airline_encoder(vec![(
        "how do i get downtown and what does it cost",
        vec![0.1, 0.2, 0.9],
    )]);
    let resolver = build_resolver(encoder, TableTagger::default());

    let result = resolver.resolve("how do i get downtown and what does it cost", "utt-3")?;

    assert_eq!(
        result.intent,
        IntentDecision::Compound {
            intents: vec!["ground_service".into(), "ground_fare".into()],
            score: 0.9
        }
    );
    Ok(())
}

#[test]
fn test_unknown_intent_keeps_entity_spans() -> Result<(), Box<dyn std::error::Error>> {
    let tagger = TableTagger::new(vec![(
        "blah blah before noon",
        vec![("time_relative", vec![0.0, 0.0, 0.9, 0.0])],
    )]);
    let resolver = build_resolver(airline_encoder(vec![]), tagger);

    let result = resolver.resolve("blah blah before noon", "utt-4")?;

    assert_eq!(result.intent, IntentDecision::Unknown);
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities[0].entity.name(), "time_relative");
    Ok(())
}

#[test]
fn test_empty_utterance_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let resolver = build_resolver(airline_encoder(vec![]), TableTagger::default());

    let result = resolver.resolve("", "utt-5")?;

    assert_eq!(result.intent, IntentDecision::Unknown);
    assert!(result.entities.is_empty());
    Ok(())
}

#[test]
fn test_dimension_mismatch_is_surfaced() {
    let encoder = airline_encoder(vec![("odd one out", vec![1.0, 0.0])]);
    let resolver = build_resolver(encoder, TableTagger::default());

    let result = resolver.resolve("odd one out", "utt-6");
    assert!(matches!(
        result,
        Err(NluError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn test_shipped_airline_catalog_loads() -> Result<(), Box<dyn std::error::Error>> {
    let config = NluConfig::from_file("data/airline.json")?;
    assert_eq!(config.intents.len(), 22);
    assert_eq!(config.entities.len(), 34);

    let dimension = config.embedding_dimension;
    let resolver = Resolver::builder()
        .with_config(config)
        .with_encoder(Arc::new(TableEncoder::new(dimension, vec![])))
        .with_tagger(Arc::new(TableTagger::default()))
        .build()?;

    let info = resolver.info();
    assert_eq!(info.num_intents, 22);
    assert_eq!(info.num_entities, 34);
    assert_eq!(info.embedding_dimension, 128);

    // All-zero embeddings score 0 everywhere: below threshold, so unknown.
    let result = resolver.resolve("show me flights from denver to boston", "utt-7")?;
    assert_eq!(result.intent, IntentDecision::Unknown);
    Ok(())
}

#[test]
fn test_thread_safety() {
    let encoder = airline_encoder(vec![("list all flights", vec![0.95, 0.2, 0.0])]);
    let resolver = Arc::new(build_resolver(encoder, TableTagger::default()));
    let mut handles = vec![];

    for worker in 0..3 {
        let resolver = Arc::clone(&resolver);
        let handle = thread::spawn(move || {
            let result = resolver
                .resolve("list all flights", format!("utt-{}", worker))
                .unwrap();
            assert_eq!(
                result.intent,
                IntentDecision::Single {
                    intent: "flight".into(),
                    score: 0.95
                }
            );
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_result_json_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let encoder = airline_encoder(vec![(
        "cheapest fare to denver",
        vec![0.2, 0.88, 0.0],
    )]);
    let tagger = TableTagger::new(vec![(
        "cheapest fare to denver",
        vec![("city_name", vec![0.0, 0.0, 0.0, 0.99])],
    )]);
    let resolver = build_resolver(encoder, tagger);

    let result = resolver.resolve("cheapest fare to denver", "utt-8")?;
    let json = serde_json::to_string(&result)?;
    let parsed: ResolutionResult = serde_json::from_str(&json)?;

    assert_eq!(parsed, result);
    Ok(())
}
