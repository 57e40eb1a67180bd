use crate::component::file_renamer::{
    RenamePolicy, SortPolicy, check_zero_pad_width, rename_policy_label, sort_policy_label,
};
use crate::config::types::{Config, Language};
use crate::menu::handlers::run_file_renamer;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use log::info;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_renamer"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_file_renamer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(2) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_renamer"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_renamer_settings_menu(term, config)?,
            Some(1) => show_language_menu(term, config)?,
            Some(2) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 批次重新命名預設值設定
fn show_renamer_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.renamer.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let current = config.settings.file_renamer.clone();
    println!(
        "\n{} {} / {}",
        style(t!("settings.renamer.current")).dim(),
        sort_policy_label(current.sort_policy),
        rename_policy_label(current.rename_policy)
    );
    println!();

    let sort_items: Vec<String> = SortPolicy::ALL.iter().map(|p| sort_policy_label(*p)).collect();
    let Some(sort_index) = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("rename.sort_prompt"))
        .items(&sort_items)
        .default(
            SortPolicy::ALL
                .iter()
                .position(|&p| p == current.sort_policy)
                .unwrap_or(0),
        )
        .interact_on_opt(term)?
    else {
        return Ok(()); // ESC pressed - return without saving
    };

    let rename_items: Vec<String> = RenamePolicy::ALL
        .iter()
        .map(|p| rename_policy_label(*p))
        .collect();
    let Some(rename_index) = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("rename.rename_prompt"))
        .items(&rename_items)
        .default(
            RenamePolicy::ALL
                .iter()
                .position(|&p| p == current.rename_policy)
                .unwrap_or(0),
        )
        .interact_on_opt(term)?
    else {
        return Ok(());
    };

    println!("{}", style(t!("rename.zero_padding_hint")).dim());
    let zero_pad_width: usize = Input::new()
        .with_prompt(t!("rename.zero_padding_prompt"))
        .default(current.zero_pad_width)
        .validate_with(|width: &usize| check_zero_pad_width(*width))
        .interact_text()?;

    let dry_run = Confirm::new()
        .with_prompt(t!("rename.dry_run_prompt"))
        .default(current.dry_run)
        .interact()?;

    let mut updated = current.clone();
    updated.sort_policy = SortPolicy::ALL[sort_index];
    updated.rename_policy = RenamePolicy::ALL[rename_index];
    updated.zero_pad_width = zero_pad_width;
    updated.dry_run = dry_run;

    if updated != current {
        config.settings.file_renamer = updated;
        config.save()?;
        info!("已更新批次重新命名預設值");
        println!("\n{}", style(t!("settings.saved")).green());
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let items: Vec<String> = Language::ALL.iter().map(|l: &Language| l.to_string()).collect();

    let default_index = Language::ALL
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = Language::ALL[selection];

    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        config.save()?;
        println!(
            "\n{} {}",
            style(t!("settings.saved")).green(),
            selected_lang
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
