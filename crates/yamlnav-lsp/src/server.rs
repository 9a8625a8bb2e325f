//! LSP server implementation using tower-lsp.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use yamlnav_core::text::position_to_offset;
use yamlnav_core::{
    Document, DocumentStore, FileSource, FileSystemSource, ReferenceResolver, Resolution,
    ResolverConfig,
};

use crate::capabilities::server_capabilities;
use crate::convert;
use crate::overlay::OverlaySource;

/// The yamlnav language server.
pub struct YamlNavLanguageServer {
    /// The LSP client for sending notifications.
    client: Client,
    /// Document store for managing open documents.
    documents: Arc<RwLock<DocumentStore>>,
    /// Options from `initializationOptions`.
    config: Arc<RwLock<ResolverConfig>>,
}

impl YamlNavLanguageServer {
    /// Create a new language server instance.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(DocumentStore::new())),
            config: Arc::new(RwLock::new(ResolverConfig::default())),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for YamlNavLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options {
            let config = ResolverConfig::from_json(options).unwrap_or_else(|error| {
                tracing::warn!(%error, "Invalid initialization options, using defaults");
                ResolverConfig::default()
            });
            *self.config.write().await = config;
        }

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: "yamlnav-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "yamlnav LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let document = document_from_uri(
            &uri,
            params.text_document.text,
            params.text_document.version,
        );

        let mut documents = self.documents.write().await;
        documents.open(uri.as_str(), document);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // We're using full document sync, so take the last change
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut documents = self.documents.write().await;
            documents.change(uri.as_str(), change.text, version);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let mut documents = self.documents.write().await;
        documents.close(params.text_document.uri.as_str());
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let position_params = params.text_document_position_params;
        let config = self.config.read().await.clone();
        let documents = self.documents.read().await;

        Ok(goto_definition(
            &documents,
            &config,
            &position_params.text_document.uri,
            position_params.position,
        ))
    }

    async fn document_link(&self, params: DocumentLinkParams) -> Result<Option<Vec<DocumentLink>>> {
        let config = self.config.read().await.clone();
        let documents = self.documents.read().await;

        Ok(document_links(&documents, &config, &params.text_document.uri))
    }
}

/// Build the document for an opened URI.
///
/// Documents without a file path resolve their imports against the server's
/// working directory.
pub fn document_from_uri(uri: &Url, text: String, version: i32) -> Document {
    let document = match uri.to_file_path() {
        Ok(path) => Document::new(path, text),
        Err(()) => {
            let directory = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Document::in_directory(directory, text)
        }
    };
    document.with_version(version)
}

/// The open document for `uri`, or the file on disk when the client never
/// opened it. Disk reads go through [`FileSystemSource`], the same reader used
/// for imports.
fn lookup_document<'a>(documents: &'a DocumentStore, uri: &Url) -> Option<Cow<'a, Document>> {
    if let Some(doc) = documents.get(uri.as_str()) {
        return Some(Cow::Borrowed(doc));
    }
    let path = uri.to_file_path().ok()?;
    let text = FileSystemSource.read_to_string(&path).ok()?;
    Some(Cow::Owned(Document::new(path, text)))
}

/// Answer a definition request at `position` in `uri`.
///
/// A definition request is itself the deliberate gesture, so the click is
/// resolved with the modifier held.
pub fn goto_definition(
    documents: &DocumentStore,
    config: &ResolverConfig,
    uri: &Url,
    position: Position,
) -> Option<GotoDefinitionResponse> {
    let doc = lookup_document(documents, uri)?;
    let offset = position_to_offset(doc.content(), convert::position_from_lsp(&position))?;

    let resolver = ReferenceResolver::new(OverlaySource::new(documents)).with_config(config.clone());
    match resolver.resolve_click(&doc, offset, true) {
        Resolution::Found(location) => {
            let link = convert::location_to_link(&location)?;
            Some(GotoDefinitionResponse::Link(vec![link]))
        }
        Resolution::NoTarget(_) => None,
    }
}

/// Links for the import paths declared in `uri`.
pub fn document_links(
    documents: &DocumentStore,
    config: &ResolverConfig,
    uri: &Url,
) -> Option<Vec<DocumentLink>> {
    let doc = lookup_document(documents, uri)?;
    let resolver = ReferenceResolver::new(OverlaySource::new(documents)).with_config(config.clone());

    Some(
        resolver
            .import_links(&doc)
            .iter()
            .filter_map(convert::import_link_to_lsp)
            .collect(),
    )
}

/// Run the LSP server over stdio.
pub async fn run_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(YamlNavLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    struct Project {
        _dir: tempfile::TempDir,
        root: PathBuf,
    }

    impl Project {
        fn new(files: &[(&str, &str)]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = fs::canonicalize(dir.path()).unwrap();
            for (name, content) in files {
                fs::write(root.join(name), content).unwrap();
            }
            Self { _dir: dir, root }
        }

        fn url(&self, name: &str) -> Url {
            Url::from_file_path(self.root.join(name)).unwrap()
        }

        fn open(&self, store: &mut DocumentStore, name: &str) {
            let url = self.url(name);
            let text = fs::read_to_string(self.root.join(name)).unwrap();
            store.open(url.as_str(), document_from_uri(&url, text, 1));
        }
    }

    const MAIN: &str = "import: b.yaml\n---\nref: *shared\n";

    fn single_link(response: GotoDefinitionResponse) -> LocationLink {
        match response {
            GotoDefinitionResponse::Link(mut links) => {
                assert_eq!(links.len(), 1);
                links.remove(0)
            }
            other => panic!("expected a location link, got {other:?}"),
        }
    }

    #[test]
    fn definition_of_alias() {
        let project = Project::new(&[("a.yaml", MAIN), ("b.yaml", "x: 1\nshared: &shared 2\n")]);
        let mut store = DocumentStore::new();
        project.open(&mut store, "a.yaml");

        let response = goto_definition(
            &store,
            &ResolverConfig::default(),
            &project.url("a.yaml"),
            Position::new(2, 7),
        )
        .unwrap();

        let link = single_link(response);
        assert_eq!(link.target_uri, project.url("b.yaml"));
        assert_eq!(link.target_range.start, Position::new(1, 8));
        assert_eq!(
            link.origin_selection_range,
            Some(Range::new(Position::new(2, 0), Position::new(2, 12)))
        );
    }

    #[test]
    fn definition_of_import_path() {
        let project = Project::new(&[("a.yaml", MAIN), ("b.yaml", "x: 1\n")]);
        let mut store = DocumentStore::new();
        project.open(&mut store, "a.yaml");

        let response = goto_definition(
            &store,
            &ResolverConfig::default(),
            &project.url("a.yaml"),
            Position::new(0, 9),
        )
        .unwrap();

        let link = single_link(response);
        assert_eq!(link.target_uri, project.url("b.yaml"));
        assert_eq!(link.target_range.start, Position::new(0, 0));
    }

    #[test]
    fn definition_uses_unsaved_import_buffer() {
        let project = Project::new(&[("a.yaml", MAIN), ("b.yaml", "x: 1\n")]);
        let mut store = DocumentStore::new();
        project.open(&mut store, "a.yaml");
        let b = project.url("b.yaml");
        store.open(
            b.as_str(),
            document_from_uri(&b, "x: 1\n\nshared: &shared 2\n".to_string(), 2),
        );

        let response = goto_definition(
            &store,
            &ResolverConfig::default(),
            &project.url("a.yaml"),
            Position::new(2, 7),
        )
        .unwrap();
        assert_eq!(single_link(response).target_range.start, Position::new(2, 8));
    }

    #[test]
    fn definition_of_unopened_document_reads_disk() {
        let project = Project::new(&[("a.yaml", MAIN), ("b.yaml", "shared: &shared 2\n")]);

        let response = goto_definition(
            &DocumentStore::new(),
            &ResolverConfig::default(),
            &project.url("a.yaml"),
            Position::new(2, 7),
        );
        assert!(response.is_some());
    }

    #[test]
    fn unopened_document_with_invalid_utf8_reads_disk() {
        let project = Project::new(&[("b.yaml", "shared: &shared 2\n")]);
        fs::write(
            project.root.join("a.yaml"),
            b"import: b.yaml\n---\nnote: \xff\nref: *shared\n",
        )
        .unwrap();

        let response = goto_definition(
            &DocumentStore::new(),
            &ResolverConfig::default(),
            &project.url("a.yaml"),
            Position::new(3, 7),
        )
        .unwrap();
        assert_eq!(single_link(response).target_uri, project.url("b.yaml"));
    }

    #[test]
    fn unopened_document_with_byte_order_mark_reads_disk() {
        let project = Project::new(&[
            ("a.yaml", "\u{feff}import: b.yaml\n---\nref: *shared\n"),
            ("b.yaml", "shared: &shared 2\n"),
        ]);

        let config = ResolverConfig::default();
        let url = project.url("a.yaml");
        let response =
            goto_definition(&DocumentStore::new(), &config, &url, Position::new(2, 7)).unwrap();
        assert_eq!(single_link(response).target_uri, project.url("b.yaml"));

        let links = document_links(&DocumentStore::new(), &config, &url).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].range,
            Range::new(Position::new(0, 8), Position::new(0, 14))
        );
    }

    #[test]
    fn no_definition_for_missing_anchor() {
        let project = Project::new(&[("a.yaml", MAIN), ("b.yaml", "x: 1\n")]);
        let mut store = DocumentStore::new();
        project.open(&mut store, "a.yaml");

        let config = ResolverConfig::default();
        let url = project.url("a.yaml");
        assert_eq!(goto_definition(&store, &config, &url, Position::new(2, 7)), None);
        // position past the last line
        assert_eq!(goto_definition(&store, &config, &url, Position::new(40, 0)), None);
    }

    #[test]
    fn links_for_import_header() {
        let project = Project::new(&[
            ("a.yaml", "import: [b.yaml, missing.yaml]\n---\nref: *shared\n"),
            ("b.yaml", "x: 1\n"),
        ]);
        let mut store = DocumentStore::new();
        project.open(&mut store, "a.yaml");

        let links =
            document_links(&store, &ResolverConfig::default(), &project.url("a.yaml")).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, Some(project.url("b.yaml")));
        assert_eq!(
            links[0].range,
            Range::new(Position::new(0, 9), Position::new(0, 15))
        );
    }

    #[test]
    fn document_from_file_uri() {
        let url = Url::parse("file:///p/a.yaml").unwrap();
        let doc = document_from_uri(&url, "a: 1".to_string(), 4);
        if cfg!(unix) {
            assert_eq!(doc.directory(), Path::new("/p"));
        }
        assert_eq!(doc.version(), Some(4));
    }

    #[test]
    fn document_from_untitled_uri() {
        let url = Url::parse("untitled:Untitled-1").unwrap();
        let doc = document_from_uri(&url, "a: 1".to_string(), 1);
        assert_eq!(doc.path(), None);
        assert_eq!(doc.content(), "a: 1");
    }
}
