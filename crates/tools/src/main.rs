use std::env;
use std::path::{Path, PathBuf};

use model::geo::LatLng;
use model::ids;
use model::pin::{ChecklistItem, Mode, Pin, PinDetails, PinPatch};
use persist::import::FilePhotoSource;
use persist::session::Session;
use persist::snapshot::FileStore;
use store::contracts::{Geocoder, NullGeocoder, PhotoSource};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut path = PathBuf::from("pinpoint.json");
    if let Some(idx) = args.iter().position(|a| a == "--file") {
        if idx + 1 >= args.len() {
            return Err("--file requires a value".to_string());
        }
        path = PathBuf::from(&args[idx + 1]);
        args.drain(idx..idx + 2);
    }

    if args.is_empty() {
        return Err(usage());
    }
    let cmd = args.remove(0);
    let mut session = Session::open(FileStore::new(path));

    match cmd.as_str() {
        "list" => cmd_list(&session, args),
        "mode" => cmd_mode(&mut session, args),
        "add" => cmd_add(&mut session, args),
        "show" => cmd_show(&session, args),
        "note" => cmd_note(&mut session, args),
        "todo" => cmd_todo(&mut session, args),
        "check" => cmd_check(&mut session, args),
        "photos" => cmd_photos(&mut session, args),
        "complete" => cmd_complete(&mut session, args),
        "delete" => cmd_delete(&mut session, args),
        _ => Err(usage()),
    }
}

fn cmd_list(session: &Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    let all = match args.as_slice() {
        [] => false,
        [flag] if flag == "--all" => true,
        _ => return Err(usage()),
    };

    let store = session.store();
    let pins: Vec<&Pin> = if all {
        store.pins().iter().collect()
    } else {
        store.visible_pins()
    };
    if !all {
        println!("browsing: {}", store.mode());
    }
    for pin in pins {
        println!(
            "{}  [{}]  {}  ({:.4}, {:.4})",
            pin.id,
            pin.mode(),
            pin.display_title(),
            pin.lat,
            pin.lng
        );
    }
    Ok(())
}

fn cmd_mode(session: &mut Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    let [mode] = args.as_slice() else {
        return Err(usage());
    };
    let mode = match mode.as_str() {
        "past" => Mode::Past,
        "future" => Mode::Future,
        other => return Err(format!("unknown mode: {other} (expected past|future)")),
    };
    session.set_mode(mode).map_err(|e| e.to_string())?;
    println!("browsing: {mode}");
    Ok(())
}

fn cmd_add(session: &mut Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    if args.len() < 2 {
        return Err(usage());
    }
    let lat: f64 = args[0].parse().map_err(|_| format!("bad latitude: {}", args[0]))?;
    let lng: f64 = args[1].parse().map_err(|_| format!("bad longitude: {}", args[1]))?;
    let at = LatLng::new(lat, lng).clamped();

    let mut future = false;
    let mut city: Option<String> = None;
    let mut country: Option<String> = None;
    let mut title: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--future" => future = true,
            "--city" => city = Some(take_value(&args, &mut i, "--city")?),
            "--country" => country = Some(take_value(&args, &mut i, "--country")?),
            "--title" => title = Some(take_value(&args, &mut i, "--title")?),
            other => return Err(format!("unknown arg: {other}\n\n{}", usage())),
        }
        i += 1;
    }

    // Best-effort place lookup; absence means manual entry via flags.
    let place = NullGeocoder.reverse(at);
    let (city, country) = match place {
        Some(p) => (city.unwrap_or(p.city), country.unwrap_or(p.country)),
        None => (city.unwrap_or_default(), country.unwrap_or_default()),
    };

    let id = ids::generate_default();
    let mut pin = if future {
        Pin::future(id.clone(), at.lat, at.lng)
    } else {
        Pin::past(id.clone(), at.lat, at.lng)
    };
    pin = pin.with_place(city, country);
    if let Some(title) = title {
        pin = pin.with_title(title);
    }

    if session.add_pin(pin).map_err(|e| e.to_string())? {
        println!("added {id}");
    }
    Ok(())
}

fn cmd_show(session: &Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    let [id] = args.as_slice() else {
        return Err(usage());
    };
    let pin = session
        .store()
        .find(id)
        .ok_or_else(|| format!("no pin with id {id}"))?;

    println!("{}  [{}]", pin.display_title(), pin.mode());
    println!("  {}, {}  ({:.4}, {:.4})", pin.city, pin.country, pin.lat, pin.lng);
    match &pin.details {
        PinDetails::Past(memory) => {
            if let Some(date) = memory.visited_date {
                println!("  visited: {date}");
            }
            if let Some(note) = &memory.memory_note {
                println!("  note: {note}");
            }
            for photo in &memory.photos {
                let caption = photo.caption.as_deref().unwrap_or("(no caption)");
                println!("  photo {}: {caption}", photo.id);
            }
        }
        PinDetails::Future(trip) => {
            if let (Some(start), Some(end)) = (trip.trip_start_date, trip.trip_end_date) {
                println!("  dates: {start} to {end}");
            }
            if let Some(notes) = &trip.trip_notes {
                println!("  notes: {notes}");
            }
            let (done, total) = trip.checklist_progress();
            if total > 0 {
                println!("  checklist ({done}/{total} done):");
                for item in &trip.checklist {
                    let mark = if item.done { "x" } else { " " };
                    println!("    [{mark}] {}  {}", item.id, item.text);
                }
            }
            if !trip.waypoints.is_empty() {
                println!("  route:");
                for waypoint in trip.waypoints_in_order() {
                    println!("    {}. {}  ({})", waypoint.order, waypoint.name, waypoint.id);
                }
            }
        }
    }
    Ok(())
}

fn cmd_note(session: &mut Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    if args.len() < 2 {
        return Err(usage());
    }
    let id = &args[0];
    let text = args[1..].join(" ");
    let mode = session
        .store()
        .find(id)
        .map(|p| p.mode())
        .ok_or_else(|| format!("no pin with id {id}"))?;
    let patch = match mode {
        Mode::Past => PinPatch::memory_note(text),
        Mode::Future => PinPatch::trip_notes(text),
    };
    session.update_pin(id, &patch).map_err(|e| e.to_string())?;
    Ok(())
}

fn cmd_todo(session: &mut Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    if args.len() < 2 {
        return Err(usage());
    }
    let id = &args[0];
    let text = args[1..].join(" ");

    let trip = session
        .store()
        .find(id)
        .ok_or_else(|| format!("no pin with id {id}"))?
        .details
        .as_trip()
        .ok_or_else(|| format!("{id} is a past memory, not a future trip"))?;

    let mut checklist = trip.checklist.clone();
    let item_id = ids::generate_default();
    checklist.push(ChecklistItem {
        id: item_id.clone(),
        text,
        done: false,
    });
    session
        .update_pin(id, &PinPatch::checklist(checklist))
        .map_err(|e| e.to_string())?;
    println!("added item {item_id}");
    Ok(())
}

fn cmd_check(session: &mut Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    let [id, item_id] = args.as_slice() else {
        return Err(usage());
    };
    let trip = session
        .store()
        .find(id)
        .ok_or_else(|| format!("no pin with id {id}"))?
        .details
        .as_trip()
        .ok_or_else(|| format!("{id} is a past memory, not a future trip"))?;
    if !trip.checklist.iter().any(|i| &i.id == item_id) {
        return Err(format!("no checklist item {item_id} on {id}"));
    }

    let checklist: Vec<ChecklistItem> = trip
        .checklist
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if &item.id == item_id {
                item.done = !item.done;
            }
            item
        })
        .collect();
    session
        .update_pin(id, &PinPatch::checklist(checklist))
        .map_err(|e| e.to_string())?;
    Ok(())
}

fn cmd_photos(session: &mut Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    if args.len() < 2 {
        return Err(usage());
    }
    let id = &args[0];
    let memory = session
        .store()
        .find(id)
        .ok_or_else(|| format!("no pin with id {id}"))?
        .details
        .as_memory()
        .ok_or_else(|| format!("{id} is a future trip; photos attach to past memories"))?;

    let paths: Vec<&Path> = args[1..].iter().map(Path::new).collect();
    let imported = FilePhotoSource::new().import(&paths);
    let skipped = paths.len() - imported.len();

    let mut photos = memory.photos.clone();
    photos.extend(imported.clone());
    let patch = PinPatch {
        photos: Some(photos),
        ..PinPatch::default()
    };
    session.update_pin(id, &patch).map_err(|e| e.to_string())?;
    println!("imported {} photo(s), skipped {skipped}", imported.len());
    Ok(())
}

fn cmd_complete(session: &mut Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    let [id] = args.as_slice() else {
        return Err(usage());
    };
    if session.complete_trip(id).map_err(|e| e.to_string())? {
        println!("completed {id}; browsing switched to past");
    } else {
        println!("nothing to complete for {id}");
    }
    Ok(())
}

fn cmd_delete(session: &mut Session<FileStore>, args: Vec<String>) -> Result<(), String> {
    let [id] = args.as_slice() else {
        return Err(usage());
    };
    if session.delete_pin(id).map_err(|e| e.to_string())? {
        println!("deleted {id}");
    } else {
        println!("no pin with id {id}");
    }
    Ok(())
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn usage() -> String {
    [
        "pinpoint — travel journal over a local snapshot file",
        "",
        "usage: pinpoint [--file PATH] <command> [args]",
        "",
        "commands:",
        "  list [--all]                       pins in the current mode (or all)",
        "  mode <past|future>                 switch browsing mode",
        "  add <lat> <lng> [--future] [--city C] [--country C] [--title T]",
        "  show <id>                          pin details",
        "  note <id> <text>                   set the memory note / trip notes",
        "  todo <id> <text>                   add a checklist item to a trip",
        "  check <id> <item-id>               toggle a checklist item",
        "  photos <id> <image file...>        attach photos to a memory",
        "  complete <id>                      promote a future trip to a memory",
        "  delete <id>                        remove a pin",
        "",
        "the snapshot lives in pinpoint.json unless --file is given",
    ]
    .join("\n")
}
