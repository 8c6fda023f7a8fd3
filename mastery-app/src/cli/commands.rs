use crate::cli::opts::*;
use crate::cli::picker::FileImage;

use anyhow::{anyhow, bail, Result};
use mastery_core::{
    filter_by_name, finish_card, finish_deck, load_card_image, load_deck_image, CardForm, Deck,
    DeckForm, Face, Finish, ImageTarget, Repository, StudySession, Topic, DECK_COLORS,
};
use mastery_json::{paths::default_store_file, JsonStore};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub async fn run_cli(args: Cli) -> Result<()> {
    let repo = open_repo(&args).await?;
    match args.cmd {
        Command::Deck(cmd) => deck_cmd(repo, cmd).await,
        Command::Topic(cmd) => topic_cmd(repo, cmd).await,
        Command::Card(cmd) => card_cmd(repo, cmd).await,
        Command::Study(sel) => study_cmd(repo, sel).await,
        Command::Tui => bail!("the TUI is started from main"),
    }
}

pub async fn open_repo(args: &Cli) -> Result<Arc<dyn Repository>> {
    let path = args.data_file.clone().unwrap_or_else(default_store_file);
    let store = JsonStore::open(path, args.max_backups).await?;
    Ok(Arc::new(store))
}

async fn deck_cmd(repo: Arc<dyn Repository>, cmd: DeckCmd) -> Result<()> {
    match cmd {
        DeckCmd::Add(a) => {
            let mut form = DeckForm::new();
            form.set_name(&a.name);
            pick_deck_image(&mut form, a.image).await;
            if let Some(c) = a.color {
                form.set_color(c)?;
            }
            let d = finish_deck(&*repo, Finish::AddTo(()), &form).await?;
            println!("{}", d.id);
        }
        DeckCmd::List { search } => {
            let decks = repo.list_decks().await?;
            let decks = filter_by_name(&decks, search.as_deref().unwrap_or(""));
            for d in decks {
                println!("{}", deck_line(&d));
            }
        }
        DeckCmd::Edit(e) => {
            let deck = resolve_deck(&*repo, &e.deck).await?;
            let mut form = DeckForm::from_deck(&deck);
            if let Some(n) = e.name {
                form.set_name(&n);
            }
            if e.clear_image {
                form.clear_image();
            }
            pick_deck_image(&mut form, e.image).await;
            if let Some(c) = e.color {
                form.set_color(c)?;
            }
            finish_deck(&*repo, Finish::EditExisting(deck.id), &form).await?;
            println!("ok");
        }
        DeckCmd::Rm { deck } => {
            let d = resolve_deck(&*repo, &deck).await?;
            repo.delete_deck(d.id).await?;
            println!("ok");
        }
        DeckCmd::Move { deck, to } => {
            let d = resolve_deck(&*repo, &deck).await?;
            repo.move_deck(d.id, to).await?;
            println!("ok");
        }
        DeckCmd::Colors => {
            for (i, c) in DECK_COLORS.iter().enumerate() {
                let note = if c.is_clear() { "\t(needs an image)" } else { "" };
                println!("{i}\t{}{note}", c.name());
            }
        }
    }
    Ok(())
}

async fn topic_cmd(repo: Arc<dyn Repository>, cmd: TopicCmd) -> Result<()> {
    match cmd {
        TopicCmd::Add { deck, name } => {
            let d = resolve_deck(&*repo, &deck).await?;
            let t = repo.add_topic(d.id, &name).await?;
            println!("{}", t.id);
        }
        TopicCmd::List { deck, search } => {
            let d = resolve_deck(&*repo, &deck).await?;
            let topics = filter_by_name(&d.topics, search.as_deref().unwrap_or(""));
            for t in topics {
                println!("{}\t{}\tcards={}", t.id, t.name, t.cards.len());
            }
        }
        TopicCmd::Rename { sel, name } => {
            let (_, t) = resolve_topic(&*repo, &sel).await?;
            repo.rename_topic(t.id, &name).await?;
            println!("ok");
        }
        TopicCmd::Rm { sel } => {
            let (_, t) = resolve_topic(&*repo, &sel).await?;
            repo.delete_topic(t.id).await?;
            println!("ok");
        }
        TopicCmd::Move { sel, to } => {
            let (_, t) = resolve_topic(&*repo, &sel).await?;
            repo.move_topic(t.id, to).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn card_cmd(repo: Arc<dyn Repository>, cmd: CardCmd) -> Result<()> {
    match cmd {
        CardCmd::Add(a) => {
            let (_, topic) = resolve_topic(&*repo, &a.sel).await?;
            let mut form = CardForm::new();
            form.set_text(ImageTarget::Front, a.front);
            form.set_text(ImageTarget::Back, a.back);
            pick_card_image(&mut form, ImageTarget::Front, a.front_image).await;
            pick_card_image(&mut form, ImageTarget::Back, a.back_image).await;
            let c = finish_card(&*repo, Finish::AddTo(topic.id), &mut form).await?;
            println!("{}", c.id);
        }
        CardCmd::List { sel } => {
            let (_, topic) = resolve_topic(&*repo, &sel).await?;
            for c in repo.list_cards(topic.id).await? {
                println!(
                    "{}\t{}{}\t{}{}",
                    c.id,
                    c.front.text,
                    image_note(c.front.image.as_deref()),
                    c.back.text,
                    image_note(c.back.image.as_deref()),
                );
            }
        }
        CardCmd::Edit(e) => {
            let id = parse_uuid(&e.card_id)?;
            let card = repo.get_card(id).await?;
            let mut form = CardForm::from_card(&card);
            if let Some(f) = e.front {
                form.set_text(ImageTarget::Front, f);
            }
            if let Some(b) = e.back {
                form.set_text(ImageTarget::Back, b);
            }
            if e.clear_front_image {
                form.clear_image(ImageTarget::Front);
            }
            if e.clear_back_image {
                form.clear_image(ImageTarget::Back);
            }
            pick_card_image(&mut form, ImageTarget::Front, e.front_image).await;
            pick_card_image(&mut form, ImageTarget::Back, e.back_image).await;
            finish_card(&*repo, Finish::EditExisting(id), &mut form).await?;
            println!("ok");
        }
        CardCmd::Rm { card_id } => {
            let id = parse_uuid(&card_id)?;
            repo.delete_card(id).await?;
            println!("ok");
        }
        CardCmd::Move { card_ids, to } => {
            let ids = card_ids
                .iter()
                .map(|s| parse_uuid(s))
                .collect::<Result<Vec<_>>>()?;
            let (_, topic) = resolve_topic(&*repo, &to).await?;
            let moved = repo.move_cards(&ids, topic.id).await?;
            println!("moved {moved}");
        }
    }
    Ok(())
}

async fn study_cmd(repo: Arc<dyn Repository>, sel: TopicSel) -> Result<()> {
    let (deck, topic) = resolve_topic(&*repo, &sel).await?;
    let cards = repo.list_cards(topic.id).await?;
    if cards.is_empty() {
        println!("no cards in {} / {}", deck.name, topic.name);
        return Ok(());
    }
    let mut session = StudySession::new(cards)?;

    loop {
        let side = session.current_side();
        let label = match session.face() {
            Face::Front => "Front",
            Face::Back => "Back",
        };
        println!(
            "\n[{}/{}] {label}: {}{}",
            session.cursor() + 1,
            session.len(),
            side.text,
            image_note(side.image.as_deref()),
        );
        let line = read_line("[enter/f=flip, n=next, p=prev, q=quit]> ")?;
        match line.trim().to_lowercase().as_str() {
            "" | "f" | "flip" => session.flip(),
            "n" | "next" => {
                if !session.can_advance() {
                    println!("(last card)");
                }
                session.advance();
            }
            "p" | "prev" => {
                if !session.can_retreat() {
                    println!("(first card)");
                }
                session.retreat();
            }
            "q" | "quit" => return Ok(()),
            _ => println!("enter f, n, p, or q"),
        }
    }
}

// ===== Helpers =====

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|_| anyhow!("invalid uuid: {s}"))
}

fn deck_line(d: &Deck) -> String {
    format!(
        "{}\t{}\tcolor={}\ttopics={}\tcards={}{}",
        d.id,
        d.name,
        d.color().name(),
        d.topics.len(),
        d.card_count(),
        image_note(d.image.as_deref()),
    )
}

fn image_note(image: Option<&[u8]>) -> String {
    image
        .map(|b| format!(" [image {} bytes]", b.len()))
        .unwrap_or_default()
}

async fn pick_deck_image(form: &mut DeckForm, path: Option<PathBuf>) {
    if path.is_none() {
        return;
    }
    if !load_deck_image(&FileImage(path), form).await {
        tracing::warn!("deck image not loaded");
    }
}

async fn pick_card_image(form: &mut CardForm, target: ImageTarget, path: Option<PathBuf>) {
    if path.is_none() {
        return;
    }
    if !load_card_image(&FileImage(path), form, target).await {
        tracing::warn!(?target, "card image not loaded");
    }
}

async fn resolve_deck<R: Repository + ?Sized>(repo: &R, sel: &str) -> Result<Deck> {
    if let Ok(id) = Uuid::parse_str(sel) {
        if let Ok(d) = repo.get_deck(id).await {
            return Ok(d);
        }
    }
    let decks = repo.list_decks().await?;
    if let Some(d) = decks.into_iter().find(|d| d.name.eq_ignore_ascii_case(sel)) {
        return Ok(d);
    }
    bail!("deck not found: {}", sel)
}

async fn resolve_topic<R: Repository + ?Sized>(repo: &R, sel: &TopicSel) -> Result<(Deck, Topic)> {
    let deck = resolve_deck(repo, &sel.deck).await?;
    let topic = match &sel.topic {
        None => deck.recently_added_topic().cloned(),
        Some(t) => {
            let by_id = Uuid::parse_str(t).ok().and_then(|id| deck.topic(id).cloned());
            by_id.or_else(|| {
                deck.topics
                    .iter()
                    .find(|x| x.name.eq_ignore_ascii_case(t))
                    .cloned()
            })
        }
    };
    match topic {
        Some(t) => Ok((deck, t)),
        None => bail!(
            "topic not found in {}: {}",
            deck.name,
            sel.topic.as_deref().unwrap_or("-")
        ),
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    if stdin().read_line(&mut s)? == 0 {
        return Ok("q".into());
    }
    Ok(s)
}
