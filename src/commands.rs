use app_core::{AppError, NewItem};
use app_ui::{App, Route, StackKind, WardrobeMode};
use fitcheck_client::{Coords, ImageUpload};
use std::path::Path;

use crate::cli::Commands;

type Outcome = Result<(), AppError>;

/// Drive the app through the screens a command touches, printing the
/// resulting view
pub async fn run(app: &App, command: Commands) -> Outcome {
    match command {
        Commands::Login { username, password } => {
            require_signed_out(app)?;
            app.sign_in(&username, &password).await?;
            println!("Signed in as {}", username.trim());
        }
        Commands::Signup { username, password } => {
            require_signed_out(app)?;
            app.navigate(Route::Signup);
            app.sign_up(&username, &password).await?;
            println!("Account created. Signed in as {}", username.trim());
        }
        Commands::Logout => {
            app.sign_out()?;
            println!("Signed out");
        }
        Commands::Status => match app.stack_kind() {
            StackKind::Main => println!("Signed in"),
            StackKind::Auth => println!("Signed out"),
        },
        Commands::Items => {
            require_session(app)?;
            app.open_wardrobe(WardrobeMode::Browse).await?;
            if let Some(grid) = app.wardrobe_view() {
                print!("{}", grid);
            }
        }
        Commands::Show { image_url } => {
            require_session(app)?;
            app.open_wardrobe(WardrobeMode::Browse).await?;
            app.choose_item(&image_url)?;
            if let Some(detail) = app.item_detail_view() {
                print!("{}", detail);
            }
        }
        Commands::Add { photo, name, gender } => {
            require_session(app)?;
            let image = read_photo(&photo).await?;

            app.open_wardrobe(WardrobeMode::Browse).await?;
            app.open_add_item()?;

            let mut item = NewItem::with_photo(image).named(name.unwrap_or_default());
            item.gender = gender;

            match app.add_item(item).await? {
                Some(saved) => println!("Saved {}  {}", saved.display_label(), saved.image_url),
                None => println!("Saved"),
            }
        }
        Commands::Delete { image_url } => {
            require_session(app)?;
            app.open_wardrobe(WardrobeMode::Browse).await?;
            app.choose_item(&image_url)?;
            app.delete_item().await?;
            println!("Deleted {}", image_url);
        }
        Commands::Recommend { prompt, photo, base, lat, lon } => {
            require_session(app)?;
            let photo = match photo {
                Some(path) => Some(read_photo(&path).await?),
                None => None,
            };

            app.open_recommend();
            if let Some(base) = base {
                app.open_wardrobe(WardrobeMode::Select).await?;
                app.choose_item(&base)?;
            }

            let coords = lat.zip(lon).map(|(lat, lon)| Coords::new(lat, lon));
            app.submit_recommendation(&prompt, photo, coords).await?;
            if let Some(result) = app.outfit_view() {
                print!("{}", result);
            }
        }
    }

    Ok(())
}

fn require_session(app: &App) -> Outcome {
    match app.stack_kind() {
        StackKind::Main => Ok(()),
        StackKind::Auth => Err(AppError::ActionUnavailable(
            "Not signed in. Run `fitcheck login` first.".to_string(),
        )),
    }
}

/// The stored session is kept until the user logs out explicitly
fn require_signed_out(app: &App) -> Outcome {
    match app.stack_kind() {
        StackKind::Auth => Ok(()),
        StackKind::Main => Err(AppError::ActionUnavailable(
            "Already signed in. Run `fitcheck logout` first.".to_string(),
        )),
    }
}

async fn read_photo(path: &Path) -> Result<ImageUpload, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Validation(format!("Could not read {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.jpg".to_string());

    Ok(ImageUpload::named(bytes, file_name))
}
