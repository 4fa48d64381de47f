diesel::table! {
    users (user_id) {
        user_id -> Uuid,
        full_name -> Text,
        email -> Text,
        password -> Text,
        phone_number -> Nullable<Text>,
        role -> Text,
        is_approved -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    categories (category_id) {
        category_id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    suppliers (supplier_id) {
        supplier_id -> Uuid,
        name -> Text,
        contact_person -> Nullable<Text>,
        email -> Nullable<Text>,
        phone -> Nullable<Text>,
        address -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    products (product_id) {
        product_id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        category_id -> Nullable<Uuid>,
        supplier_id -> Nullable<Uuid>,
        price -> Float8,
        quantity -> Int4,
        reorder_level -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    orders (order_id) {
        order_id -> Uuid,
        customer_id -> Uuid,
        order_date -> Timestamptz,
        status -> Text,
        total_amount -> Float8,
        shipping_address -> Nullable<Text>,
    }
}

diesel::table! {
    order_items (order_item_id) {
        order_item_id -> Uuid,
        order_id -> Uuid,
        product_id -> Uuid,
        quantity -> Int4,
        price -> Float8,
    }
}

diesel::joinable!(products -> categories (category_id));
diesel::joinable!(products -> suppliers (supplier_id));
diesel::joinable!(orders -> users (customer_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    categories,
    suppliers,
    products,
    orders,
    order_items,
);
