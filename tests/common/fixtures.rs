//! Component sources shared across the integration suites.

/// The canonical counter: two text slots over one signal chain, three
/// event slots.
pub const COUNTER: &str = r#"
"use client";

component Counter() {
    let count = signal(0);
    let doubled = derived(count * 2);

    <div class="counter">
        <span>{count}</span>
        <span>{doubled}</span>
        <button onClick={count = count + 1}>+</button>
        <button onClick={count = count - 1}>-</button>
        <button onClick={count = 0}>reset</button>
    </div>
}
"#;

/// Conditional and keyed iteration regions plus a static interpolation.
pub const TODO_LIST: &str = r#"
component TodoList(title, items) {
    let filter = signal("");
    let visible = derived(items);

    <section>
        <h1>{title}</h1>
        <input value={filter} />
        {#if filter}
            <p>filtering</p>
        {#else}
            <p>all items</p>
        {/if}
        <ul>
            {#for item in items key item.id}
                <li>{item.text}</li>
            {/for}
        </ul>
    </section>
}
"#;

/// Server-only page; the dom backend is skipped for it.
pub const SERVER_PAGE: &str = r#"
"use server";

component Page(title) {
    let visits = signal(0);
    <main>
        <h1>{title}</h1>
        <p>{visits}</p>
    </main>
}
"#;
