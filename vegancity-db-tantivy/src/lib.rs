use std::{collections::BTreeSet, fs, path::Path, sync::Arc};

use anyhow::Result as Fallible;
use parking_lot::Mutex;
use tantivy::{
    collector::DocSetCollector,
    directory::MmapDirectory,
    query::{BooleanQuery, Occur, Query, TermQuery},
    schema::*,
    tokenizer::{
        AsciiFoldingFilter, LowerCaser, RemoveLongFilter, SimpleTokenizer, StopWordFilter,
        TextAnalyzer, TokenStream,
    },
    Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term,
};
use vegancity_core::{
    db::{
        IdIndex, IdIndexer, IndexedKind, Indexer, ReviewIndexer, SearchIndexer, TagIndexer,
        VendorIndexer,
    },
    entities::*,
};

const OVERALL_INDEX_HEAP_SIZE_IN_BYTES: usize = 50_000_000;

const TEXT_TOKENIZER: &str = "vegancity_text";

// Words too common to narrow down a search.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

fn text_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(40))
        .filter(LowerCaser)
        .filter(AsciiFoldingFilter)
        .filter(StopWordFilter::remove(
            STOP_WORDS.iter().map(|w| (*w).to_owned()),
        ))
        .build()
}

#[derive(Debug, Clone, Copy)]
struct IndexedFields {
    // Unique across all kinds of documents: "<kind>:<id>"
    key: Field,
    id: Field,
    kind: Field,
    title: Field,
    body: Field,
    extra: Field,
}

fn build_schema() -> (Schema, IndexedFields) {
    let text_options = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(TEXT_TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    );
    let mut schema_builder = Schema::builder();
    let key = schema_builder.add_text_field("key", STRING);
    let id = schema_builder.add_text_field("id", STRING | STORED);
    let kind = schema_builder.add_text_field("kind", STRING);
    let title = schema_builder.add_text_field("title", text_options.clone());
    let body = schema_builder.add_text_field("body", text_options.clone());
    let extra = schema_builder.add_text_field("extra", text_options);
    let schema = schema_builder.build();
    let fields = IndexedFields {
        key,
        id,
        kind,
        title,
        body,
        extra,
    };
    (schema, fields)
}

fn document_key(kind: IndexedKind, id: &str) -> String {
    format!("{}:{}", kind.as_str(), id)
}

/// The texts of a single document.
#[derive(Debug, Default)]
struct IndexedTexts<'a> {
    title: Option<&'a str>,
    body: Option<&'a str>,
    extra: Vec<&'a str>,
}

struct TantivyIndex {
    fields: IndexedFields,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    text_analyzer: TextAnalyzer,
}

impl TantivyIndex {
    fn create<P: AsRef<Path>>(path: Option<P>) -> Fallible<Self> {
        let (schema, fields) = build_schema();
        let index = if let Some(path) = path {
            let path = path.as_ref();
            log::info!(
                "Opening full-text search index in directory: {}",
                path.display()
            );
            fs::create_dir_all(path)?;
            Index::open_or_create(MmapDirectory::open(path)?, schema)?
        } else {
            log::warn!("Creating full-text search index in RAM");
            Index::create_in_ram(schema)
        };
        let text_analyzer = text_analyzer();
        index
            .tokenizers()
            .register(TEXT_TOKENIZER, text_analyzer.clone());
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        let writer = index.writer_with_num_threads(1, OVERALL_INDEX_HEAP_SIZE_IN_BYTES)?;
        Ok(Self {
            fields,
            reader,
            writer: Mutex::new(writer),
            text_analyzer,
        })
    }

    fn add_or_update(&self, kind: IndexedKind, id: &Id, texts: IndexedTexts) -> Fallible<()> {
        let key = document_key(kind, id.as_str());
        let mut doc = TantivyDocument::default();
        doc.add_text(self.fields.key, &key);
        doc.add_text(self.fields.id, id.as_str());
        doc.add_text(self.fields.kind, kind.as_str());
        if let Some(title) = texts.title {
            doc.add_text(self.fields.title, title);
        }
        if let Some(body) = texts.body {
            doc.add_text(self.fields.body, body);
        }
        for extra in texts.extra {
            doc.add_text(self.fields.extra, extra);
        }
        let writer = self.writer.lock();
        writer.delete_term(Term::from_field_text(self.fields.key, &key));
        writer.add_document(doc)?;
        Ok(())
    }

    fn remove(&self, id: &Id) {
        let writer = self.writer.lock();
        for kind in IndexedKind::ALL {
            let key = document_key(kind, id.as_str());
            writer.delete_term(Term::from_field_text(self.fields.key, &key));
        }
    }

    fn flush(&self) -> Fallible<()> {
        self.writer.lock().commit()?;
        self.reader.reload()?;
        Ok(())
    }

    /// The distinct words of a query text as they are stored in the index.
    fn query_words(&self, text: &str) -> BTreeSet<String> {
        let mut analyzer = self.text_analyzer.clone();
        let mut words = BTreeSet::new();
        analyzer
            .token_stream(text)
            .process(&mut |token| {
                words.insert(token.text.clone());
            });
        words
    }

    /// Every word must occur in at least one of the text fields.
    fn text_query(&self, words: BTreeSet<String>) -> BooleanQuery {
        let IndexedFields {
            title, body, extra, ..
        } = self.fields;
        let clauses = words
            .into_iter()
            .map(|word| {
                let any_field = [title, body, extra]
                    .into_iter()
                    .map(|field| {
                        let query = TermQuery::new(
                            Term::from_field_text(field, &word),
                            IndexRecordOption::Basic,
                        );
                        (Occur::Should, Box::new(query) as Box<dyn Query>)
                    })
                    .collect();
                (Occur::Must, Box::new(BooleanQuery::new(any_field)) as Box<dyn Query>)
            })
            .collect();
        BooleanQuery::new(clauses)
    }

    fn query_ids(&self, kind: IndexedKind, text: &str) -> Fallible<Vec<Id>> {
        let words = self.query_words(text);
        if words.is_empty() {
            log::debug!("No searchable words in query text '{text}'");
            return Ok(vec![]);
        }
        let kind_query = TermQuery::new(
            Term::from_field_text(self.fields.kind, kind.as_str()),
            IndexRecordOption::Basic,
        );
        let query = BooleanQuery::new(vec![
            (Occur::Must, Box::new(kind_query) as Box<dyn Query>),
            (Occur::Must, Box::new(self.text_query(words))),
        ]);
        let searcher = self.reader.searcher();
        let doc_addresses = searcher.search(&query, &DocSetCollector)?;
        let mut ids = Vec::with_capacity(doc_addresses.len());
        for doc_addr in doc_addresses {
            let doc = searcher.doc::<TantivyDocument>(doc_addr)?;
            match doc.get_first(self.fields.id).and_then(|v| v.as_str()) {
                Some(id) => ids.push(Id::from(id)),
                None => log::error!("Missing id in document {doc_addr:?}"),
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

/// A full-text index of vendors, tags and reviews that can
/// be shared between threads.
#[derive(Clone)]
pub struct SearchEngine(Arc<TantivyIndex>);

impl SearchEngine {
    pub fn init_in_ram() -> Fallible<SearchEngine> {
        let no_path: Option<&Path> = None;
        Self::init_with_path(no_path)
    }

    pub fn init_with_path<P: AsRef<Path>>(path: Option<P>) -> Fallible<SearchEngine> {
        let index = TantivyIndex::create(path)?;
        Ok(SearchEngine(Arc::new(index)))
    }

    /// Number of searchable documents since the last flush.
    pub fn num_docs(&self) -> u64 {
        self.0.reader.searcher().num_docs()
    }
}

impl Indexer for SearchEngine {
    fn flush_index(&mut self) -> Fallible<()> {
        self.0.flush()
    }
}

impl IdIndex for SearchEngine {
    fn query_ids(&self, kind: IndexedKind, text: &str) -> Fallible<Vec<Id>> {
        self.0.query_ids(kind, text)
    }
}

impl IdIndexer for SearchEngine {
    fn remove_by_id(&self, id: &Id) -> Fallible<()> {
        self.0.remove(id);
        Ok(())
    }
}

impl VendorIndexer for SearchEngine {
    fn add_or_update_vendor(&self, vendor: &Vendor) -> Fallible<()> {
        let extra = [vendor.website.as_deref(), vendor.address.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let texts = IndexedTexts {
            title: Some(&vendor.name),
            body: vendor.notes.as_deref(),
            extra,
        };
        self.0.add_or_update(IndexedKind::Vendor, &vendor.id, texts)
    }
}

impl TagIndexer for SearchEngine {
    fn add_or_update_tag(&self, tag: &Tag) -> Fallible<()> {
        let texts = IndexedTexts {
            title: Some(&tag.name),
            body: Some(&tag.description),
            ..Default::default()
        };
        self.0.add_or_update(IndexedKind::of_tag(tag.kind), &tag.id, texts)
    }
}

impl ReviewIndexer for SearchEngine {
    fn add_or_update_review(&self, review: &Review) -> Fallible<()> {
        let texts = IndexedTexts {
            title: review.title.as_deref(),
            body: Some(&review.content),
            ..Default::default()
        };
        self.0.add_or_update(IndexedKind::Review, &review.id, texts)
    }
}

impl SearchIndexer for SearchEngine {}
