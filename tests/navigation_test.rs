mod common;

use assert2::{check, let_assert};
use common::{FlakyChannel, StalledChannel, popup, sample_export};
use quickaccess_browse::channel::Export;
use quickaccess_browse::config::FetchConfig;
use quickaccess_browse::page::ViewMode;
use quickaccess_browse::render::PageBody;
use quickaccess_browse::{
    BrowseConfig, BrowsePage, Command, FetchError, LoadState, MemoryChannel, MemoryHistory,
    Navigator, PageError, Popup, ResourceId, Route, Screen, SearchSession, TagId,
};
use rstest::rstest;
use std::sync::Arc;

fn tag_slugs(screen: &Screen) -> Vec<String> {
    let_assert!(Screen::Page(view) = screen);
    let_assert!(PageBody::Tags(rows) = &view.body);
    rows.iter().map(|row| row.slug.clone()).collect()
}

fn resource_names(screen: &Screen) -> Vec<String> {
    let_assert!(Screen::Page(view) = screen);
    let_assert!(PageBody::Resources(rows) = &view.body);
    rows.iter().map(|row| row.name.clone()).collect()
}

fn title(screen: &Screen) -> String {
    let_assert!(Screen::Page(view) = screen);
    view.title.clone()
}

#[rstest]
#[tokio::test]
async fn tag_list_opens_sorted(#[future] popup: Popup) {
    let mut popup = popup.await;
    let screen = popup.execute(Command::Show).await.unwrap();

    check!(popup.current_path() == Route::Tags.path());
    check!(title(&screen) == "Tags");
    check!(tag_slugs(&screen) == ["banking", "Home", "work"]);
}

#[rstest]
#[tokio::test]
async fn typing_filters_the_tag_list(#[future] popup: Popup) {
    let mut popup = popup.await;
    let screen = popup.execute(Command::Search("o".to_string())).await.unwrap();
    check!(tag_slugs(&screen) == ["Home", "work"]);

    let screen = popup.execute(Command::Search("zzz".to_string())).await.unwrap();
    let_assert!(Screen::Page(view) = screen);
    let_assert!(PageBody::Empty { message } = view.body);
    check!(message.contains("No result match your search"));
}

#[rstest]
#[tokio::test]
async fn selecting_a_tag_lists_its_resources_with_a_fresh_query(#[future] popup: Popup) {
    let mut popup = popup.await;
    popup.execute(Command::Search("o".to_string())).await.unwrap();

    // Rows are ["Home", "work"].
    let screen = popup.execute(Command::SelectTag(1)).await.unwrap();

    check!(popup.current_path() == Route::TagResources(TagId::new("t-home")).path());
    check!(popup.session().query() == "");
    check!(title(&screen) == "Home");
    check!(resource_names(&screen) == ["Bank", "Gmail"]);
}

#[rstest]
#[tokio::test]
async fn going_back_restores_the_tag_list_search(#[future] popup: Popup) {
    let mut popup = popup.await;
    popup.execute(Command::Search("o".to_string())).await.unwrap();
    popup.execute(Command::SelectTag(2)).await.unwrap();

    let screen = popup.execute(Command::Search("admin".to_string())).await.unwrap();
    check!(resource_names(&screen) == ["admin-panel"]);

    let screen = popup.execute(Command::Back).await.unwrap();
    check!(popup.current_path() == Route::Tags.path());
    check!(popup.session().query() == "o");
    check!(tag_slugs(&screen) == ["Home", "work"]);
}

#[rstest]
#[tokio::test]
async fn going_back_forgets_the_search_of_the_page_left(#[future] popup: Popup) {
    let mut popup = popup.await;
    popup.execute(Command::SelectTag(2)).await.unwrap();
    popup.execute(Command::Search("bank".to_string())).await.unwrap();
    popup.execute(Command::Back).await.unwrap();

    let screen = popup.execute(Command::SelectTag(2)).await.unwrap();
    check!(popup.session().query() == "");
    check!(resource_names(&screen) == ["Bank", "Gmail"]);
}

#[rstest]
#[tokio::test]
async fn opening_a_resource_and_coming_back_restores_its_search(#[future] popup: Popup) {
    let mut popup = popup.await;
    // banking, Home, work
    popup.execute(Command::SelectTag(3)).await.unwrap();
    popup.execute(Command::Search("alice".to_string())).await.unwrap();

    let screen = popup.execute(Command::SelectResource(1)).await.unwrap();
    check!(screen == Screen::Resource(ResourceId::new("r-aws")));
    check!(popup.page().is_none());
    check!(popup.session().query() == "");

    let screen = popup.execute(Command::Back).await.unwrap();
    check!(popup.session().query() == "alice");
    check!(title(&screen) == "work");
    check!(resource_names(&screen) == ["AWS"]);
}

#[rstest]
#[tokio::test]
async fn leaving_the_tag_list_backwards_returns_home(#[future] popup: Popup) {
    let mut popup = popup.await;
    popup.execute(Command::Search("work".to_string())).await.unwrap();

    let screen = popup.execute(Command::Back).await.unwrap();
    check!(screen == Screen::Home);
    check!(popup.session().query() == "");
    check!(popup.session().history().is_empty());

    // The tag list opens again without the abandoned search.
    let screen = popup.execute(Command::Tags).await.unwrap();
    check!(tag_slugs(&screen).len() == 3);
}

#[rstest]
#[case(Command::SelectTag(0))]
#[case(Command::SelectTag(4))]
#[case(Command::SelectResource(1))]
#[tokio::test]
async fn out_of_range_rows_are_rejected(#[future] popup: Popup, #[case] command: Command) {
    let mut popup = popup.await;
    let_assert!(Err(PageError::NoSuchRow(_)) = popup.execute(command).await);
    // The tag list is still usable.
    check!(popup.page().is_some());
    check!(popup.current_path() == Route::Tags.path());
}

#[rstest]
#[tokio::test]
async fn empty_tag_shows_the_no_tagged_resources_message(sample_export: Export) {
    let mut export = sample_export;
    export.tags.push(quickaccess_browse::Tag::new("t-new", "fresh"));
    let mut popup = Popup::new(Arc::new(MemoryChannel::new(export)), BrowseConfig::default());
    popup.execute(Command::Tags).await.unwrap();

    // banking, fresh, Home, work
    let screen = popup.execute(Command::SelectTag(2)).await.unwrap();
    let_assert!(Screen::Page(view) = screen);
    check!(view.title == "fresh");
    let_assert!(PageBody::Empty { message } = view.body);
    check!(message.starts_with("No passwords are marked with this tag yet"));
}

#[rstest]
#[case("", "No passwords are yet tagged. It does feel a bit empty here, tag your first password.")]
#[case("  ", "No result match your search. Try with another search term.")]
#[case("work", "No result match your search. Try with another search term.")]
#[tokio::test]
async fn empty_tag_list_message_follows_the_search_box(
    #[case] query: &str,
    #[case] expected: &str,
) {
    let mut popup = Popup::new(Arc::new(MemoryChannel::default()), BrowseConfig::default());
    popup.execute(Command::Tags).await.unwrap();

    let screen = popup.execute(Command::Search(query.to_string())).await.unwrap();
    let_assert!(Screen::Page(view) = screen);
    let_assert!(PageBody::Empty { message } = view.body);
    check!(message == expected);
}

#[rstest]
#[tokio::test]
async fn failed_load_can_be_retried(sample_export: Export) {
    let mut popup = Popup::new(
        Arc::new(FlakyChannel::new(sample_export, 1)),
        BrowseConfig::default(),
    );

    let screen = popup.execute(Command::Tags).await.unwrap();
    let_assert!(Screen::Page(view) = screen);
    let_assert!(PageBody::Failed { error, .. } = view.body);
    check!(error.contains("background page unavailable"));
    let_assert!(Some(page) = popup.page());
    let_assert!(Some(FetchError::Rejected { .. }) = page.tags().error());

    let screen = popup.execute(Command::Retry).await.unwrap();
    check!(tag_slugs(&screen) == ["banking", "Home", "work"]);
}

#[tokio::test]
async fn stalled_channel_times_out() {
    let config = BrowseConfig {
        fetch: FetchConfig { timeout_ms: 30 },
        ..BrowseConfig::default()
    };
    let mut popup = Popup::new(Arc::new(StalledChannel), config);

    popup.execute(Command::Tags).await.unwrap();
    let_assert!(Some(page) = popup.page());
    let_assert!(Some(FetchError::Timeout { request, .. }) = page.tags().error());
    check!(request == "passbolt.tags.find-all");
}

#[rstest]
#[tokio::test]
async fn deep_link_resolves_the_tag_by_id(sample_export: Export) {
    let channel = MemoryChannel::new(sample_export);
    let history = MemoryHistory::new(Route::TagResources(TagId::new("t-bank")).path());
    let mut session = SearchSession::new();

    let (mut page, load) = BrowsePage::mount(&mut session, &history, &BrowseConfig::default()).unwrap();
    check!(page.selected_tag().is_none());
    check!(page.mode() == &ViewMode::TagResources(TagId::new("t-bank")));

    check!(page.apply(load.run(&channel).await));
    let_assert!(Some(tag) = page.selected_tag());
    check!(tag.slug == "banking");
    let names: Vec<&str> = page
        .displayed_resources(&session)
        .records()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    check!(names == ["Bank"]);
}

#[rstest]
#[tokio::test]
async fn deep_link_to_unknown_tag_fails(sample_export: Export) {
    let channel = MemoryChannel::new(sample_export);
    let history = MemoryHistory::new(Route::TagResources(TagId::new("t-gone")).path());
    let mut session = SearchSession::new();

    let (mut page, load) = BrowsePage::mount(&mut session, &history, &BrowseConfig::default()).unwrap();
    page.apply(load.run(&channel).await);
    check!(page.resources() == &LoadState::Failed(FetchError::TagNotFound(TagId::new("t-gone"))));
}

#[rstest]
#[tokio::test]
async fn payload_for_another_tag_is_ignored(sample_export: Export) {
    let channel = MemoryChannel::new(sample_export);
    let mut history = MemoryHistory::new(Route::Home.path());
    history.push(
        Route::TagResources(TagId::new("t-work")).path(),
        Some(quickaccess_browse::LocationState {
            selected_tag: Some(quickaccess_browse::Tag::new("t-home", "Home")),
        }),
    );
    let mut session = SearchSession::new();

    let (mut page, load) = BrowsePage::mount(&mut session, &history, &BrowseConfig::default()).unwrap();
    check!(page.selected_tag().is_none());
    page.apply(load.run(&channel).await);
    check!(page.selected_tag().map(|t| t.slug.as_str()) == Some("work"));
}

#[tokio::test]
async fn unmounted_page_drops_late_results() {
    let history = MemoryHistory::new(Route::Tags.path());
    let mut session = SearchSession::new();
    let (mut page, load) = BrowsePage::mount(&mut session, &history, &BrowseConfig::default()).unwrap();

    page.unmount();
    // Returns promptly even though the channel never answers.
    let outcome = load.run(&StalledChannel).await;
    check!(outcome.is_cancelled());
    check!(!page.apply(outcome));
    check!(page.tags() == &LoadState::Loading);
    let_assert!(Err(PageError::Unmounted) = page.retry());
}

#[tokio::test]
async fn dropping_the_page_cancels_its_loads() {
    let history = MemoryHistory::new(Route::Tags.path());
    let mut session = SearchSession::new();
    let (page, load) = BrowsePage::mount(&mut session, &history, &BrowseConfig::default()).unwrap();

    drop(page);
    check!(load.run(&StalledChannel).await.is_cancelled());
}

#[rstest]
#[tokio::test]
async fn superseded_load_is_ignored(sample_export: Export) {
    let channel = MemoryChannel::new(sample_export);
    let history = MemoryHistory::new(Route::Tags.path());
    let mut session = SearchSession::new();
    let (mut page, first) = BrowsePage::mount(&mut session, &history, &BrowseConfig::default()).unwrap();
    let second = page.retry().unwrap();

    check!(!page.apply(first.run(&channel).await));
    check!(page.tags() == &LoadState::Loading);
    check!(page.apply(second.run(&channel).await));
    check!(page.tags().records().map(<[_]>::len) == Some(3));
}

#[rstest]
#[case(Route::Home)]
#[case(Route::Resource(ResourceId::new("r-aws")))]
fn mounting_outside_browse_routes_fails(#[case] route: Route) {
    let history = MemoryHistory::new(route.path());
    let mut session = SearchSession::new();
    let_assert!(
        Err(PageError::UnroutablePath(path)) =
            BrowsePage::mount(&mut session, &history, &BrowseConfig::default())
    );
    check!(path == route.path());
}
