//! Page Widgets Example
//!
//! Wires both controllers to a mock page:
//! - an accordion with three FAQ sections, toggled through click events
//! - an uploader fed in-memory files against a logging transport
//!
//! Run with `cargo run -p embedkit-lib --example page`.

use std::sync::Arc;

use async_trait::async_trait;
use embedkit_lib::{
    AccordionController, FileSource, MemoryFile, Progress, SectionId, Transport, TransferError,
    TransferRequest, UploadConfig, UploadController,
};
use pagedom::{Document, Dom, Element, Event};
use simplelog::{Config, LevelFilter, TermLogger, TerminalMode};
use tokio_util::sync::CancellationToken;

/// Stand-in endpoint: logs each part it would post and accepts it.
struct LoggingTransport;

#[async_trait]
impl Transport for LoggingTransport {
    async fn send(
        &self,
        request: TransferRequest,
        progress: Progress,
        _cancel: CancellationToken,
    ) -> Result<(), TransferError> {
        let total = request.data.len() as u64;
        log::info!(
            "POST multipart part {:?} ({} bytes, {})",
            request.meta.name,
            total,
            request.meta.mime
        );
        progress.report(total / 2, total);
        progress.report(total, total);
        Ok(())
    }
}

fn build_page() -> Dom {
    let faq = Element::box_().id("faq").children(vec![
        Element::text("What is this?").id("q1"),
        Element::text("A widget demo.").id("a1"),
        Element::text("Is it styled?").id("q2"),
        Element::text("The host page does that.").id("a2"),
        Element::text("Can I upload files?").id("q3"),
        Element::text("Drop them below.").id("a3"),
    ]);

    let root = Element::box_().id("page").children(vec![
        faq,
        Element::box_().id("drop-zone").class("dropzone"),
        Element::box_().id("preview-list"),
    ]);
    Dom::new(Document::new(root))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let dom = build_page();

    // Accordion: click through the sections
    let mut accordion = AccordionController::initialize(&dom, "faq")?;
    accordion.handle_event(&Event::Click { target: "q1".into() });
    accordion.handle_event(&Event::Click { target: "q3".into() });
    accordion.handle_event(&Event::Click { target: "q3".into() });
    accordion.expand(SectionId::new(1));
    log::info!("expanded section: {:?}", accordion.expanded_section());

    // Uploader: drag, drop, transfer
    let uploader = UploadController::builder()
        .dom(dom.clone())
        .transport(LoggingTransport)
        .config(UploadConfig::default().max_concurrent_transfers(2))
        .on_render(|item| {
            log::info!(
                "render {} -> {:?} ({}%)",
                item.meta.name,
                item.status,
                item.progress_percent
            );
        })
        .initialize()?;

    uploader.handle_event(&Event::DragOver { target: "drop-zone".into() });

    let files: Vec<Arc<dyn FileSource>> = vec![
        Arc::new(MemoryFile::new("photo.png", "image/png", vec![0x89; 512])),
        Arc::new(MemoryFile::new("notes.pdf", "application/pdf", vec![0x25; 256])),
        Arc::new(MemoryFile::unreadable("broken.jpg", "image/jpeg", "corrupt handle")),
    ];
    let batch = uploader.on_drop(files);
    uploader.wait_idle(batch).await;

    uploader.start_upload(batch);
    uploader.wait_idle(batch).await;

    for item in uploader.snapshot(batch).unwrap_or_default() {
        log::info!(
            "{}: {:?} (error: {:?})",
            item.meta.name,
            item.status,
            item.error
        );
    }

    uploader.destroy();
    Ok(())
}
